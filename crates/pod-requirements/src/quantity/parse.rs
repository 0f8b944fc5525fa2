use thiserror::Error;

use super::Quantity;

/// Errors produced when decoding quantity text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQuantityError {
    #[error("quantity is empty")]
    Empty,
    #[error("invalid number in quantity `{input}`")]
    InvalidNumber { input: String },
    #[error("unrecognized suffix `{suffix}` in quantity `{input}`")]
    InvalidSuffix { input: String, suffix: String },
    #[error("quantity `{input}` is not a whole number of nano-units")]
    ExcessPrecision { input: String },
    #[error("quantity `{input}` is out of range")]
    OutOfRange { input: String },
}

/// Multiplier named by a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    /// 10^n
    Decimal(i32),
    /// 1024^n
    Binary(u32),
}

fn parse_suffix(suffix: &str) -> Option<Scale> {
    let scale = match suffix {
        "" => Scale::Decimal(0),
        "n" => Scale::Decimal(-9),
        "u" => Scale::Decimal(-6),
        "m" => Scale::Decimal(-3),
        "k" => Scale::Decimal(3),
        "M" => Scale::Decimal(6),
        "G" => Scale::Decimal(9),
        "T" => Scale::Decimal(12),
        "P" => Scale::Decimal(15),
        "E" => Scale::Decimal(18),
        "Ki" => Scale::Binary(1),
        "Mi" => Scale::Binary(2),
        "Gi" => Scale::Binary(3),
        "Ti" => Scale::Binary(4),
        "Pi" => Scale::Binary(5),
        "Ei" => Scale::Binary(6),
        _ => return parse_exponent(suffix),
    };
    Some(scale)
}

/// `e3`, `E-2`, `e+6`: a power of ten. A bare `E` never reaches here.
fn parse_exponent(suffix: &str) -> Option<Scale> {
    let exponent = suffix.strip_prefix(|c: char| c == 'e' || c == 'E')?;
    let digits = exponent
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(exponent);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    exponent.parse::<i32>().ok().map(Scale::Decimal)
}

pub(super) fn parse(input: &str) -> Result<Quantity, ParseQuantityError> {
    if input.is_empty() {
        return Err(ParseQuantityError::Empty);
    }
    let invalid_number = || ParseQuantityError::InvalidNumber {
        input: input.to_string(),
    };
    let out_of_range = || ParseQuantityError::OutOfRange {
        input: input.to_string(),
    };

    let (negative, unsigned) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let number_len = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, suffix) = unsigned.split_at(number_len);

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid_number());
    }

    let scale = parse_suffix(suffix).ok_or_else(|| ParseQuantityError::InvalidSuffix {
        input: input.to_string(),
        suffix: suffix.to_string(),
    })?;

    // Significant digits as one integer mantissa; the dropped decimal point
    // becomes a negative power of ten.
    let fraction = fraction.trim_end_matches('0');
    let digits = format!("{whole}{fraction}");
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(Quantity::ZERO);
    }
    // only ASCII digits remain, so the parse can only fail on overflow
    let mantissa: i128 = digits.parse().map_err(|_| out_of_range())?;

    // mantissa * 10^tens * 1024^k == mantissa * 5^tens * 2^(tens + 10k)
    let (tens, binary_twos) = match scale {
        Scale::Decimal(exp) => (i64::from(exp), 0),
        Scale::Binary(exp) => (0, 10 * i64::from(exp)),
    };
    let tens = 9 - fraction.len() as i64 + tens;

    let nanos = scale_by(mantissa, 5, tens)
        .and_then(|value| scale_by(value, 2, tens + binary_twos))
        .map_err(|err| match err {
            ScaleError::Overflow => out_of_range(),
            ScaleError::Inexact => ParseQuantityError::ExcessPrecision {
                input: input.to_string(),
            },
        })?;

    Ok(Quantity::from_nanos(if negative { -nanos } else { nanos }))
}

enum ScaleError {
    Overflow,
    Inexact,
}

/// `value * base^exp`, exact. A negative `exp` divides and must leave no
/// remainder. Dividing by the five part first keeps every intermediate no
/// larger than the final result.
fn scale_by(value: i128, base: i128, exp: i64) -> Result<i128, ScaleError> {
    if exp >= 0 {
        u32::try_from(exp)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .and_then(|factor| value.checked_mul(factor))
            .ok_or(ScaleError::Overflow)
    } else {
        let divisor = u32::try_from(-exp)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .ok_or(ScaleError::Inexact)?;
        if value % divisor != 0 {
            return Err(ScaleError::Inexact);
        }
        Ok(value / divisor)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn nanos(text: &str) -> i128 {
        parse(text).unwrap().as_nanos()
    }

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(nanos("0"), 0);
        assert_eq!(nanos("1"), 1_000_000_000);
        assert_eq!(nanos("1.5"), 1_500_000_000);
        assert_eq!(nanos(".5"), 500_000_000);
        assert_eq!(nanos("2."), 2_000_000_000);
        assert_eq!(nanos("007"), 7_000_000_000);
        assert_eq!(nanos("+3"), 3_000_000_000);
        assert_eq!(nanos("-3"), -3_000_000_000);
    }

    #[test]
    fn parse_decimal_suffixes() {
        assert_eq!(nanos("1n"), 1);
        assert_eq!(nanos("1u"), 1_000);
        assert_eq!(nanos("50m"), 50_000_000);
        assert_eq!(nanos("2k"), 2_000_000_000_000);
        assert_eq!(nanos("1M"), 1_000_000 * 1_000_000_000);
        assert_eq!(nanos("1G"), 1_000_000_000 * 1_000_000_000);
        assert_eq!(nanos("1E"), 10_i128.pow(27));
    }

    #[test]
    fn parse_binary_suffixes() {
        assert_eq!(nanos("1Ki"), 1024 * 1_000_000_000);
        assert_eq!(nanos("2Gi"), 2 * (1 << 30) * 1_000_000_000);
        assert_eq!(nanos("0.1Gi"), 107_374_182_400_000_000);
        assert_eq!(nanos("1Ei"), (1_i128 << 60) * 1_000_000_000);
    }

    #[test]
    fn parse_exponents() {
        assert_eq!(nanos("1e3"), nanos("1k"));
        assert_eq!(nanos("1E3"), nanos("1k"));
        assert_eq!(nanos("5e-3"), nanos("5m"));
        assert_eq!(nanos("1.5e+2"), nanos("150"));
        assert_eq!(nanos("12e-9"), 12);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert_eq!(parse(""), Err(ParseQuantityError::Empty));
        for text in ["-", ".", "1.2.3", "m", "--1", " 1", "1 "] {
            assert!(
                matches!(
                    parse(text),
                    Err(ParseQuantityError::InvalidNumber { .. }
                        | ParseQuantityError::InvalidSuffix { .. })
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_unknown_or_miscased_suffixes() {
        for text in ["1K", "1gi", "1GI", "1Gb", "1B", "1mi", "1e", "1e-", "1ee3", "1Kii"] {
            assert_eq!(
                parse(text),
                Err(ParseQuantityError::InvalidSuffix {
                    input: text.to_string(),
                    suffix: text[1..].to_string(),
                }),
            );
        }
    }

    #[test]
    fn parse_rejects_sub_nano_values() {
        assert_eq!(
            parse("0.5n"),
            Err(ParseQuantityError::ExcessPrecision {
                input: "0.5n".to_string()
            })
        );
        assert!(matches!(
            parse("1e-10"),
            Err(ParseQuantityError::ExcessPrecision { .. })
        ));
        assert!(matches!(
            parse("1e-400"),
            Err(ParseQuantityError::ExcessPrecision { .. })
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_values() {
        assert!(matches!(
            parse("170141183460469231731687303715884105728n"),
            Err(ParseQuantityError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse("1000000000000Ei"),
            Err(ParseQuantityError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse("1e40"),
            Err(ParseQuantityError::OutOfRange { .. })
        ));
        assert_eq!(
            nanos("170141183460469231731687303715884105727n"),
            i128::MAX
        );
        assert_eq!(
            nanos("-170141183460469231731687303715884105727n"),
            -i128::MAX
        );
    }

    #[test]
    fn parse_accepts_exa_scale_values() {
        assert_eq!(nanos("8Ei"), 9_223_372_036_854_775_808_000_000_000);
        assert_eq!(nanos("100Ei"), 100 * (1_i128 << 60) * 1_000_000_000);
        assert_eq!(nanos("9223372036854775808"), (1_i128 << 63) * 1_000_000_000);
        assert_eq!(nanos("1.5Ei"), 3 * (1_i128 << 59) * 1_000_000_000);
    }

    #[test]
    fn trailing_zeros_do_not_cost_precision() {
        assert_eq!(nanos("1.000000000000000000000"), 1_000_000_000);
        assert_eq!(nanos("0.000000001000"), 1);
    }
}

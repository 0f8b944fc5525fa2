use super::NANOS_PER_UNIT;

/// Rendering candidates in tie-break order, with the number of nano-units per
/// unit of mantissa.
const SUFFIXES: [(&str, u128); 16] = [
    ("", NANOS_PER_UNIT as u128),
    ("m", 1_000_000),
    ("u", 1_000),
    ("n", 1),
    ("Ki", (1 << 10) * NANOS_PER_UNIT as u128),
    ("Mi", (1 << 20) * NANOS_PER_UNIT as u128),
    ("Gi", (1 << 30) * NANOS_PER_UNIT as u128),
    ("Ti", (1 << 40) * NANOS_PER_UNIT as u128),
    ("Pi", (1 << 50) * NANOS_PER_UNIT as u128),
    ("Ei", (1 << 60) * NANOS_PER_UNIT as u128),
    ("k", 1_000 * NANOS_PER_UNIT as u128),
    ("M", 1_000_000 * NANOS_PER_UNIT as u128),
    ("G", 1_000_000_000 * NANOS_PER_UNIT as u128),
    ("T", 1_000_000_000_000 * NANOS_PER_UNIT as u128),
    ("P", 1_000_000_000_000_000 * NANOS_PER_UNIT as u128),
    ("E", 1_000_000_000_000_000_000 * NANOS_PER_UNIT as u128),
];

pub(super) fn render(nanos: i128) -> String {
    let magnitude = nanos.unsigned_abs();

    // "n" always divides exactly, so there is at least one candidate.
    let mut best: Option<String> = None;
    for (suffix, divisor) in SUFFIXES {
        let Some(mantissa) = mantissa(magnitude, divisor) else {
            continue;
        };
        let candidate = format!("{mantissa}{suffix}");
        if best.as_ref().map_or(true, |b| candidate.len() < b.len()) {
            best = Some(candidate);
        }
    }

    let text = best.unwrap_or_else(|| format!("{magnitude}n"));
    if nanos < 0 {
        format!("-{text}")
    } else {
        text
    }
}

/// Exact decimal text of `magnitude / divisor`, or `None` when that would
/// need a fractional mantissa below one.
///
/// Every divisor is of the form 2^a * 10^b, so the expansion terminates.
fn mantissa(magnitude: u128, divisor: u128) -> Option<String> {
    let whole = magnitude / divisor;
    let mut remainder = magnitude % divisor;
    if remainder == 0 {
        return Some(whole.to_string());
    }
    if whole == 0 {
        return None;
    }

    let mut text = format!("{whole}.");
    while remainder != 0 {
        remainder *= 10;
        let digit = (remainder / divisor) as u8;
        text.push(char::from(b'0' + digit));
        remainder %= divisor;
    }
    Some(text)
}

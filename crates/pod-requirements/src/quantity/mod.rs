//! Exact resource quantities.
//!
//! A [`Quantity`] is stored as a signed count of nano-units (10^-9 of the base
//! unit: cores for CPU, bytes for memory). Every suffix accepted by the parser
//! maps onto a whole number of nano-units, so values written as `"500m"`,
//! `"0.1Gi"` or `"2e3"` add without rounding. The display scale is not
//! remembered; it is chosen from the value when rendering.

mod format;
mod parse;

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

pub use parse::ParseQuantityError;

/// Nano-units per base unit.
pub(crate) const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// Largest magnitude a quantity can hold. The range is symmetric so that
/// every value can be negated and rendered text always parses back.
pub(crate) const MAX_NANOS: i128 = i128::MAX;

/// An exact, signed resource quantity.
///
/// Equality, ordering and hashing compare numeric values, so `"1Gi"` and
/// `"1024Mi"` are the same quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    nanos: i128,
}

impl Quantity {
    /// The additive identity.
    pub const ZERO: Quantity = Quantity { nanos: 0 };

    /// Parse Kubernetes quantity notation, e.g. `"50m"`, `"1.5Gi"`, `"2e3"`.
    ///
    /// # Errors
    ///
    /// - [`ParseQuantityError`] when the text is not a number followed by a
    ///   recognized suffix, or the value cannot be held exactly
    pub fn parse(text: &str) -> Result<Self, ParseQuantityError> {
        parse::parse(text)
    }

    /// A whole number of base units (cores, bytes, ...).
    pub const fn from_units(units: i64) -> Self {
        Self {
            nanos: units as i128 * NANOS_PER_UNIT,
        }
    }

    /// A whole number of milli-units.
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis as i128 * 1_000_000,
        }
    }

    pub(crate) const fn from_nanos(nanos: i128) -> Self {
        Self { nanos }
    }

    /// The value in nano-units.
    pub const fn as_nanos(&self) -> i128 {
        self.nanos
    }

    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    /// Exact sum, or `None` if the result does not fit.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.nanos.checked_add(other.nanos) {
            Some(nanos) if nanos >= -MAX_NANOS => Some(Self { nanos }),
            _ => None,
        }
    }

    /// Canonical text rendering, see [`fmt::Display`].
    pub fn to_text(&self) -> String {
        format::render(self.nanos)
    }
}

/// Exact while the total stays within `±MAX_NANOS`, saturating beyond that.
impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos).max(-MAX_NANOS),
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Renders the shortest exact form. Ties prefer no suffix, then `m`, `u`,
/// `n`, binary suffixes and decimal suffixes in that order. A fractional
/// mantissa is only used when its integer part is non-zero, so `0.6` cores
/// renders as `600m` while `1.1Gi` stays `1.1Gi`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

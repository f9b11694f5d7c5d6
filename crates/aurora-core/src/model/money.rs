// ── Money ──
//
// Prices are held as integer minor units (cents) so tier multipliers and
// totals are exact. The wire format carries major units as JSON numbers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An amount of money in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a wire amount in major units, rounding to the nearest cent.
    ///
    /// Returns `None` for non-finite or out-of-range values.
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    pub fn from_major_f64(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        if cents.is_finite() && cents.abs() < 9.0e15 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Apply an integer percentage, rounding half up to the nearest cent.
    ///
    /// Returns `None` on overflow.
    pub fn checked_percent(self, pct: u32) -> Option<Self> {
        let scaled = self.0.checked_mul(i64::from(pct))?.checked_add(50)?;
        Some(Self(scaled.div_euclid(100)))
    }

    /// Multiply by a head or day count. Returns `None` on overflow.
    pub fn checked_times(self, count: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(count)).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Self::from_major_f64(units)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {units}")))
    }
}

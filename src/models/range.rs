//! Low/high cost ranges.
//!
//! Every price in the site is a pair of estimates: the cheapest plausible
//! outcome and the most expensive one. [`CostRange`] carries unrounded
//! intermediate values while an estimate is being computed, and
//! [`MoneyRange`] is the rounded, whole-currency-unit result shown to users.
//!
//! Both serialize as a two-element JSON array (`[low, high]`) to match the
//! pricing configuration format.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Unrounded cost range used during calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct CostRange {
    /// Low estimate
    pub low: f64,
    /// High estimate
    pub high: f64,
}

impl CostRange {
    /// Range with both ends at zero.
    pub const ZERO: Self = Self { low: 0.0, high: 0.0 };

    /// Creates a new range. No ordering is enforced here; see [`Self::is_ordered`].
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Multiplies both ends by `factor` (e.g. a per-square-foot rate by an area).
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            low: self.low * factor,
            high: self.high * factor,
        }
    }

    /// Returns true if both ends are finite, non-negative and `low <= high`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low >= 0.0 && self.low <= self.high
    }

    /// Rounds each end to the nearest whole unit.
    ///
    /// Halves round away from zero. Negative values (which a validated
    /// configuration never produces) saturate to zero.
    #[must_use]
    pub fn round(self) -> MoneyRange {
        MoneyRange {
            low: round_amount(self.low),
            high: round_amount(self.high),
        }
    }
}

fn round_amount(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

impl Add for CostRange {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            low: self.low + rhs.low,
            high: self.high + rhs.high,
        }
    }
}

impl From<[f64; 2]> for CostRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<CostRange> for [f64; 2] {
    fn from(range: CostRange) -> Self {
        [range.low, range.high]
    }
}

/// Rounded cost range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct MoneyRange {
    /// Low estimate
    pub low: u64,
    /// High estimate
    pub high: u64,
}

impl MoneyRange {
    /// Creates a new rounded range.
    #[must_use]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }
}

impl From<[u64; 2]> for MoneyRange {
    fn from([low, high]: [u64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<MoneyRange> for [u64; 2] {
    fn from(range: MoneyRange) -> Self {
        [range.low, range.high]
    }
}

// Fixed-point currency in crores and the bid increment ladder.
//
// Every purse, price and bid is held as a whole number of hundredths of a
// crore. Rounding to two decimals happens once, when a float enters the
// system, so increments and purse deductions are exact from then on.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Hundredths per crore.
pub const CRORE_SCALE: i64 = 100;

/// Smallest purse a team needs to keep bidding.
pub const MIN_BID_UNIT: Crores = Crores(50);

/// Smallest amount a price can move by.
pub const MIN_TRADABLE_UNIT: Crores = Crores(5);

/// An amount of money in crores, stored as hundredths.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Crores(i64);

impl Crores {
    pub const ZERO: Crores = Crores(0);

    /// Build from a raw count of hundredths.
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Crores(hundredths)
    }

    /// Build from a decimal value, rounding to the nearest hundredth.
    pub fn from_f64(value: f64) -> Self {
        Crores((value * CRORE_SCALE as f64).round() as i64)
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / CRORE_SCALE as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Divide evenly across `count` items, rounding to the nearest hundredth.
    /// Returns zero when `count` is zero.
    pub fn average_over(self, count: usize) -> Self {
        if count == 0 {
            return Crores::ZERO;
        }
        let count = count as i64;
        // Round half away from zero on the integer representation.
        let doubled = self.0 * 2 + count * self.0.signum();
        Crores(doubled / (count * 2))
    }
}

impl From<f64> for Crores {
    fn from(value: f64) -> Self {
        Crores::from_f64(value)
    }
}

impl From<Crores> for f64 {
    fn from(value: Crores) -> Self {
        value.to_f64()
    }
}

impl Add for Crores {
    type Output = Crores;

    fn add(self, rhs: Crores) -> Crores {
        Crores(self.0 + rhs.0)
    }
}

impl AddAssign for Crores {
    fn add_assign(&mut self, rhs: Crores) {
        self.0 += rhs.0;
    }
}

impl Sub for Crores {
    type Output = Crores;

    fn sub(self, rhs: Crores) -> Crores {
        Crores(self.0 - rhs.0)
    }
}

impl SubAssign for Crores {
    fn sub_assign(&mut self, rhs: Crores) {
        self.0 -= rhs.0;
    }
}

impl Sum for Crores {
    fn sum<I: Iterator<Item = Crores>>(iter: I) -> Crores {
        iter.fold(Crores::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Debug for Crores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crores({self})")
    }
}

impl fmt::Display for Crores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}{}.{:02}", abs / CRORE_SCALE, abs % CRORE_SCALE)
    }
}

// ---------------------------------------------------------------------------
// Bid ladder
// ---------------------------------------------------------------------------

/// The step added to `current` by the next bid.
///
/// | current bid        | increment |
/// |--------------------|-----------|
/// | below 1.00         | 0.05      |
/// | 1.00 up to 2.00    | 0.10      |
/// | 2.00 up to 5.00    | 0.20      |
/// | 5.00 and above     | 0.25      |
pub fn bid_increment(current: Crores) -> Crores {
    match current.hundredths() {
        h if h < 100 => Crores(5),
        h if h < 200 => Crores(10),
        h if h < 500 => Crores(20),
        _ => Crores(25),
    }
}

/// The amount the next bid on a lot standing at `current` must be.
pub fn next_bid(current: Crores) -> Crores {
    current + bid_increment(current)
}

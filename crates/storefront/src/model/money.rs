//! Single-currency money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// An amount in the store currency.
///
/// Backed by a decimal so that percentage taxes stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest unit price or cart subtotal the store accepts (10^18).
    ///
    /// Totals derived from amounts up to this bound, under any valid pricing
    /// policy, always fit in a `Decimal`, so the unchecked operators below
    /// cannot overflow on them.
    pub const MAX: Money = Money(Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0));

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Whole currency units, e.g. `Money::from_units(15_000)`.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }

    /// This amount scaled by `rate` (0.11 for eleven percent).
    pub fn scaled(self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }

    /// [`times`](Self::times), or `None` if the result would not fit.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Whether this amount is within [`Money::MAX`].
    pub fn is_within_limit(&self) -> bool {
        *self <= Money::MAX
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

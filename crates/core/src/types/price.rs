//! Type-safe price representation using decimal arithmetic.
//!
//! All money in Medidesk is a [`Decimal`] in the currency's standard unit
//! (dollars, not cents). Binary floating point is never used for amounts, so
//! sums such as `0.1 + 0.2` are exact.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places used for currency display and tax rounding.
pub const CURRENCY_SCALE: u32 = 2;

/// Round an amount to cents using round-half-up (away from zero on a tie).
///
/// ```rust
/// use medidesk_core::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// assert_eq!(round_currency(Decimal::new(1004, 3)), Decimal::new(100, 2));
/// ```
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// An amount shown to the user, always with two decimal places.
///
/// Amounts are in dollars; the portal serves a single currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CURRENCY_SCALE))
    }

    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", round_currency(self.0))
    }
}

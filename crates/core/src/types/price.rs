//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog is priced in Kazakhstani tenge. Amounts travel over the REST
//! API and through the persisted cart as plain JSON numbers.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency symbol appended to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₸";

/// `ru-RU` digit group separator (no-break space).
const GROUP_SEPARATOR: char = '\u{a0}';

/// A tenge amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero tenge.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Storefront formatting: `1 234,5 ₸`.
    ///
    /// Whole tenge are grouped by thousands with a no-break space, the
    /// fraction uses a decimal comma and keeps at most two digits, trailing
    /// zeros dropped.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.0.round_dp(2).normalize();
        let digits = amount.abs().to_string();
        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(whole, fraction)| {
                (whole, Some(fraction))
            });

        let mut out = String::with_capacity(digits.len() + 8);
        if amount.is_sign_negative() && !amount.is_zero() {
            out.push('-');
        }
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push(',');
            out.push_str(fraction);
        }
        out.push(GROUP_SEPARATOR);
        out.push_str(CURRENCY_SYMBOL);
        out
    }

    /// Admin table formatting: two fixed decimals, `1234.50 ₸`.
    #[must_use]
    pub fn fixed(&self) -> String {
        format!("{:.2} {CURRENCY_SYMBOL}", self.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

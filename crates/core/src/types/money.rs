//! Type-safe monetary amounts using decimal arithmetic.
//!
//! Catalog prices arrive from the backend as integral đồng amounts
//! (e.g. 45000 for a burger), so [`Money::vnd`] is the usual constructor.
//! Arithmetic across currencies is rejected rather than silently coerced.

use core::fmt;
use core::ops::Mul;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from monetary arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Two amounts with different currencies were combined.
    #[error("currency mismatch: {left:?} vs {right:?}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        left: CurrencyCode,
        /// Currency of the right-hand operand.
        right: CurrencyCode,
    },
    /// The operation overflowed the decimal range.
    #[error("monetary overflow")]
    Overflow,
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Vietnamese đồng - the catalog's native currency.
    #[default]
    VND,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::VND => "đ",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}

/// A monetary amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (đồng, dollars).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// An amount of Vietnamese đồng.
    #[must_use]
    pub fn vnd(dong: i64) -> Self {
        Self::new(Decimal::from(dong), CurrencyCode::VND)
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency code.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Whether the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ
    /// and [`MoneyError::Overflow`] when the sum leaves the decimal range.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtract an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ
    /// and [`MoneyError::Overflow`] when the difference leaves the decimal
    /// range.
    pub fn checked_sub(self, other: Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtract an amount of the same currency, flooring the result at zero.
    ///
    /// Discounts are applied with this so an over-generous voucher never
    /// produces a negative total.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ.
    pub fn saturating_sub(self, other: Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let amount = self.amount.saturating_sub(other.amount);
        Ok(Self::new(amount.max(Decimal::ZERO), self.currency))
    }

    fn require_same_currency(self, other: Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency,
        )
    }
}

impl fmt::Display for Money {
    /// Formats đồng amounts the way the app shows them: `45.000 đ`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency {
            CurrencyCode::VND => {
                write!(f, "{} đ", group_thousands(&self.amount.trunc().to_string()))
            }
            currency => write!(f, "{}{}", currency.symbol(), self.amount),
        }
    }
}

/// Insert `.` separators every three digits of the integral part.
fn group_thousands(digits: &str) -> String {
    let (sign, unsigned) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));

    let mut grouped = String::with_capacity(unsigned.len() + unsigned.len() / 3 + 1);
    let offset = unsigned.len() % 3;
    for (i, ch) in unsigned.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

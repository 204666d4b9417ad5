//! Money value object: USD amounts in integer cents.
//!
//! Prices in the catalog are decimals with at most two fractional digits.
//! Storing them as integer cents keeps every sum exact; only `Display`
//! rounds to the two-digit currency string (there is nothing to round by
//! then, the amount already is whole cents).

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Non-negative USD amount in integer cents.
///
/// Compared by value; arithmetic is explicit (`checked_add`, `checked_mul`)
/// so overflow never silently wraps.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Cents) -> Option<Cents> {
        self.0.checked_add(other.0).map(Cents)
    }

    pub fn checked_mul(self, factor: u64) -> Option<Cents> {
        self.0.checked_mul(factor).map(Cents)
    }

    pub fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }

    /// Exact sum of an amount iterator; `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Cents>) -> Option<Cents> {
        amounts
            .into_iter()
            .try_fold(Cents::ZERO, |acc, c| acc.checked_add(c))
    }

    /// Parse a non-negative decimal string (`"100"`, `"99.5"`, `"12.34"`).
    ///
    /// Rejects negatives, more than two fractional digits, and anything
    /// that is not a plain decimal number.
    pub fn from_decimal_str(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_amount("amount cannot be empty"));
        }
        if s.starts_with('-') {
            return Err(DomainError::invalid_amount(format!(
                "amount cannot be negative: {s}"
            )));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_amount(format!(
                "malformed amount: {s}"
            )));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_amount(format!(
                "amounts are limited to cent precision: {s}"
            )));
        }

        let dollars: u64 = whole
            .parse()
            .map_err(|_| DomainError::invalid_amount(format!("amount out of range: {s}")))?;

        // "99.5" means 50 cents, not 5.
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().unwrap_or(0) * 10,
            _ => frac.parse::<u64>().unwrap_or(0),
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Cents)
            .ok_or_else(|| DomainError::invalid_amount(format!("amount out of range: {s}")))
    }
}

impl core::fmt::Display for Cents {
    /// Formats as a USD currency string with digit grouping, e.g. `$1,234.56`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;

        let digits = dollars.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "${grouped}.{cents:02}")
    }
}

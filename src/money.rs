//! Currency amounts and their localized presentation.
//!
//! Amounts are stored as integer minor units (cents) so that cart totals
//! are exact sums. Formatting is locale driven: the currency symbol, the
//! thousands separator and the decimal separator come from configuration.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use num_format::{Buffer, CustomFormat, Grouping};

use crate::error::Result;

/// A non-negative currency amount in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units (`1590` is 15.90).
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Plain `major.minor` form, independent of locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// MoneyFormat
// =============================================================================

/// Localized currency formatter: `R$ 1.234,56`.
#[derive(Debug, Clone)]
pub struct MoneyFormat {
    symbol: String,
    decimal: String,
    grouping: CustomFormat,
}

impl MoneyFormat {
    /// Build a formatter. Fails if a separator is longer than `num-format` allows.
    pub fn new(symbol: &str, thousands: &str, decimal: &str) -> Result<Self> {
        let grouping = CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(thousands)
            .decimal(decimal)
            .build()?;

        Ok(Self {
            symbol: symbol.to_string(),
            decimal: decimal.to_string(),
            grouping,
        })
    }

    /// Format with the currency symbol.
    pub fn format(&self, amount: Money) -> String {
        if self.symbol.is_empty() {
            self.format_plain(amount)
        } else {
            format!("{} {}", self.symbol, self.format_plain(amount))
        }
    }

    /// Format without the currency symbol, always two fraction digits.
    pub fn format_plain(&self, amount: Money) -> String {
        let mut buf = Buffer::default();
        buf.write_formatted(&(amount.cents() / 100), &self.grouping);
        format!("{}{}{:02}", buf.as_str(), self.decimal, amount.cents() % 100)
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal: ",".to_string(),
            grouping: CustomFormat::builder()
                .grouping(Grouping::Standard)
                .separator(".")
                .decimal(",")
                .build()
                .unwrap_or_default(),
        }
    }
}

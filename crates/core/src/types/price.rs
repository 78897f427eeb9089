//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers and are held as [`Decimal`] so that
//! cart and order totals add up exactly. [`Price`] pairs an amount with a
//! currency for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in US dollars, the catalog's only currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Format for display with symbol and thousands separators (e.g., "$1,234.50").
    #[must_use]
    pub fn display(&self) -> String {
        let fixed = self.plain();
        let (sign, digits) = fixed
            .strip_prefix('-')
            .map_or(("", fixed.as_str()), |rest| ("-", rest));
        let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

        format!(
            "{sign}{}{}.{cents}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }

    /// Format with exactly two decimals and no symbol (e.g., "1234.50").
    #[must_use]
    pub fn plain(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// ISO 4217 currency codes the catalog prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::usd(Decimal::new(1234, 2)).display(), "$12.34");
        assert_eq!(Price::usd(Decimal::new(10, 0)).display(), "$10.00");
        assert_eq!(Price::usd(Decimal::new(5, 1)).display(), "$0.50");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::usd(Decimal::new(123_456_789, 2)).display(), "$1,234,567.89");
        assert_eq!(Price::usd(Decimal::new(100_000, 2)).display(), "$1,000.00");
        assert_eq!(Price::usd(Decimal::new(99_999, 2)).display(), "$999.99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(10_995, 3)).display(), "$11.00");
        assert_eq!(Price::usd(Decimal::new(-1_005, 3)).display(), "-$1.01");
    }

    #[test]
    fn test_plain_has_no_symbol() {
        assert_eq!(Price::usd(Decimal::new(10_995, 2)).plain(), "109.95");
        assert_eq!(Price::new(Decimal::new(3, 0), CurrencyCode::USD).plain(), "3.00");
    }

    #[test]
    fn test_usd_symbol() {
        assert_eq!(Price::new(Decimal::ONE, CurrencyCode::default()).display(), "$1.00");
    }
}

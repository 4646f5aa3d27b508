//! Money formatting.
//!
//! Subtotals and line prices arrive as integer minor currency units and are
//! formatted by a pure, injectable function so each storefront can apply its
//! own locale rules.

use rusty_money::{Money, iso::Currency};

/// Pure money formatter: minor currency units to display text.
///
/// Blanket-implemented for closures, so a storefront can inject any locale
/// rule without a newtype:
///
/// ```
/// use cartline::money::FormatMoney;
///
/// let yen = |minor: u64| format!("¥{minor}");
/// assert_eq!(yen.format(500), "¥500");
/// ```
pub trait FormatMoney: Send + Sync {
    /// Format `minor_units` for display.
    fn format(&self, minor_units: u64) -> String;
}

impl<F> FormatMoney for F
where
    F: Fn(u64) -> String + Send + Sync,
{
    fn format(&self, minor_units: u64) -> String {
        self(minor_units)
    }
}

/// ISO-currency formatter.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormatter {
    currency: &'static Currency,
}

impl CurrencyFormatter {
    /// Create a formatter for the given ISO currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(rusty_money::iso::USD)
    }
}

impl FormatMoney for CurrencyFormatter {
    fn format(&self, minor_units: u64) -> String {
        let minor = i64::try_from(minor_units).unwrap_or(i64::MAX);

        Money::from_minor(minor, self.currency).to_string()
    }
}

//! Currency formatting for estimate ranges.
//!
//! Formatting sits behind the [`MoneyFormat`] trait so a deployment can
//! swap in another locale. The built-in [`CurrencyFormat`] follows en-CA
//! conventions: no decimals, comma thousands separators, and a symbol
//! prefix (`$4,000`, `US$4,000`, `CHF 4,000`).

use crate::models::MoneyRange;

/// Separator placed between the low and high ends of a range.
pub const RANGE_SEPARATOR: &str = " – ";

/// Formats whole-unit amounts as currency.
pub trait MoneyFormat {
    /// Formats one amount in the given ISO 4217 currency with no fractional digits.
    fn format_amount(&self, amount: u64, currency: &str) -> String;

    /// Formats a range as `"{low} – {high}"`.
    fn format_range(&self, range: MoneyRange, currency: &str) -> String {
        format!(
            "{}{RANGE_SEPARATOR}{}",
            self.format_amount(range.low, currency),
            self.format_amount(range.high, currency)
        )
    }
}

/// en-CA currency formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyFormat;

impl CurrencyFormat {
    /// Symbol used for a currency code, if it has a short one in en-CA.
    fn symbol(currency: &str) -> Option<&'static str> {
        match currency.to_ascii_uppercase().as_str() {
            "CAD" => Some("$"),
            "USD" => Some("US$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "AUD" => Some("A$"),
            _ => None,
        }
    }
}

impl MoneyFormat for CurrencyFormat {
    fn format_amount(&self, amount: u64, currency: &str) -> String {
        let digits = group_thousands(amount);
        match Self::symbol(currency) {
            Some(symbol) => format!("{symbol}{digits}"),
            None => format!("{} {digits}", currency.to_ascii_uppercase()),
        }
    }
}

/// Formats a range with the default en-CA formatter.
#[must_use]
pub fn format_range(range: MoneyRange, currency: &str) -> String {
    CurrencyFormat.format_range(range, currency)
}

/// Inserts comma separators every three digits.
fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_range_cad() {
        assert_eq!(
            format_range(MoneyRange::new(5250, 8960), "CAD"),
            "$5,250 – $8,960"
        );
    }

    #[test]
    fn test_format_amount_symbols() {
        assert_eq!(CurrencyFormat.format_amount(4000, "USD"), "US$4,000");
        assert_eq!(CurrencyFormat.format_amount(4000, "eur"), "€4,000");
        assert_eq!(CurrencyFormat.format_amount(4000, "CHF"), "CHF 4,000");
    }

    struct PlainFormat;

    impl MoneyFormat for PlainFormat {
        fn format_amount(&self, amount: u64, currency: &str) -> String {
            format!("{amount} {currency}")
        }
    }

    #[test]
    fn test_custom_formatter() {
        assert_eq!(
            PlainFormat.format_range(MoneyRange::new(1, 2), "CAD"),
            "1 CAD – 2 CAD"
        );
    }
}

//! Currency parsing and display formatting.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoneyError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount '{0}'")]
    Invalid(String),
}

/// Parse a formatted currency string such as `$1,234,567` into whole units.
///
/// Currency symbols, thousands separators (`,` and `.`) and whitespace are
/// stripped before parsing. A final separator followed by one or two digits
/// marks a fractional part, which is truncated: `$1,234.56` is `1234`.
pub fn parse_fine(text: &str) -> Result<u64, MoneyError> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .collect();

    let whole = match cleaned.rfind(|c| c == '.' || c == ',') {
        Some(pos) if is_fraction(&cleaned[pos + 1..]) => &cleaned[..pos],
        _ => cleaned.as_str(),
    };

    let digits: String = whole.chars().filter(|c| !matches!(c, ',' | '.')).collect();
    if digits.is_empty() {
        return if cleaned.is_empty() {
            Err(MoneyError::Empty)
        } else {
            Err(MoneyError::Invalid(text.to_string()))
        };
    }

    digits
        .parse::<u64>()
        .map_err(|_| MoneyError::Invalid(text.to_string()))
}

/// One or two trailing digits after the last separator.
fn is_fraction(tail: &str) -> bool {
    (1..=2).contains(&tail.len()) && tail.bytes().all(|b| b.is_ascii_digit())
}

/// Display settings for currency amounts: symbol prefix and thousands grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub separator: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            separator: ".".to_string(),
        }
    }
}

impl MoneyFormat {
    pub fn new(symbol: &str, separator: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            separator: separator.to_string(),
        }
    }

    /// `1234567` -> `$1.234.567`
    pub fn format(&self, amount: u64) -> String {
        format!("{}{}", self.symbol, self.group(amount))
    }

    /// Rounded currency display for derived values (means, medians).
    pub fn format_rounded(&self, value: f64) -> String {
        self.format(value.max(0.0).round() as u64)
    }

    /// Plain grouped number with at most one decimal, for alternate units.
    pub fn format_units(&self, value: f64) -> String {
        let tenths = (value.max(0.0) * 10.0).round() as u64;
        let whole = self.group(tenths / 10);
        match tenths % 10 {
            0 => whole,
            d => format!("{}{}{}", whole, self.decimal_separator(), d),
        }
    }

    /// Group digits of `amount` in threes using the configured separator.
    pub fn group(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push_str(&self.separator);
            }
            out.push(ch);
        }
        out
    }

    fn decimal_separator(&self) -> &str {
        if self.separator == "." {
            ","
        } else {
            "."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formatted_amounts() {
        assert_eq!(parse_fine("$1,000"), Ok(1000));
        assert_eq!(parse_fine("$ 2.500.000"), Ok(2_500_000));
        assert_eq!(parse_fine("42"), Ok(42));
    }

    #[test]
    fn test_parse_truncates_fractional_part() {
        assert_eq!(parse_fine("$1,234.56"), Ok(1234));
        assert_eq!(parse_fine("$1.234,5"), Ok(1234));
        assert_eq!(parse_fine("99.9"), Ok(99));
        // Three digits after the separator are still thousands.
        assert_eq!(parse_fine("1.234"), Ok(1234));
        assert_eq!(parse_fine("$1,234,567"), Ok(1_234_567));
        assert!(matches!(parse_fine(".50"), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_fine(""), Err(MoneyError::Empty));
        assert_eq!(parse_fine("$"), Err(MoneyError::Empty));
        assert!(matches!(parse_fine("N/A"), Err(MoneyError::Invalid(_))));
        assert!(matches!(parse_fine("-$500"), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn test_format_groups_thousands() {
        let money = MoneyFormat::default();
        assert_eq!(money.format(0), "$0");
        assert_eq!(money.format(999), "$999");
        assert_eq!(money.format(1000), "$1.000");
        assert_eq!(money.format(1_234_567), "$1.234.567");
    }

    #[test]
    fn test_format_custom_separator() {
        let money = MoneyFormat::new("US$", ",");
        assert_eq!(money.format(12_345_678), "US$12,345,678");
    }

    #[test]
    fn test_format_rounded_and_units() {
        let money = MoneyFormat::default();
        assert_eq!(money.format_rounded(1499.6), "$1.500");
        assert_eq!(money.format_units(1234.0), "1.234");
        assert_eq!(money.format_units(1234.56), "1.234,6");
    }
}

//! Amount parsing and display
//!
//! Amounts are shown with Indian digit grouping (`12,34,567`) and at most
//! three fraction digits, trailing zeros dropped.

/// Mask shown instead of a hidden balance
pub const HIDDEN_BALANCE: &str = "••••••";

/// Parse a user-entered amount
///
/// Accepts a finite number greater than zero; blank, non-numeric, zero and
/// negative input all yield `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// `₹ 1,23,456.5` style
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{} {}", symbol, format_amount(amount))
}

/// Group an amount Indian style with up to three fraction digits
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Plain number without grouping: `1500`, `12.5`
pub fn plain_amount(amount: f64) -> String {
    let rounded = (amount * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

/// Last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 250.5 "), Some(250.5));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(123456.5), "1,23,456.5");
        assert_eq!(format_amount(12345678.0), "1,23,45,678");
        assert_eq!(format_amount(-2500.125), "-2,500.125");
        assert_eq!(format_amount(1.23456), "1.235");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency("₹", 1500.0), "₹ 1,500");
        assert_eq!(plain_amount(1500.0), "1500");
        assert_eq!(plain_amount(12.5), "12.5");
    }
}

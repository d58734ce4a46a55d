//! Display formatting for screener values.
//!
//! The presentation layer renders these strings verbatim, so the formats are
//! contracts: percentages as `12.34%`, ratios as `1.05`, quotes as
//! `R$ 101.50`, liquidity and market value as `R$ 1,234,567` (thousands
//! grouped, no decimals).

/// Format a percentage value, two decimal places.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a ratio, two decimal places.
pub fn ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a quoted price in BRL, two decimal places.
pub fn quote(value: f64) -> String {
    format!("R$ {:.2}", value)
}

/// Format a monetary amount in BRL, rounded to whole units with
/// thousands grouping.
pub fn money_grouped(value: f64) -> String {
    format!("R$ {}", group_thousands(value))
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);
    let bytes = digits.as_bytes();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.3), "12.30%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(1234.56), "1234.56%");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1.05), "1.05");
        assert_eq!(ratio(0.9), "0.90");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(101.5), "R$ 101.50");
        assert_eq!(quote(8.0), "R$ 8.00");
    }

    #[test]
    fn test_money_grouped() {
        assert_eq!(money_grouped(950.0), "R$ 950");
        assert_eq!(money_grouped(125_000.0), "R$ 125,000");
        assert_eq!(money_grouped(1_234_567.0), "R$ 1,234,567");
        assert_eq!(money_grouped(1_234_567.4), "R$ 1,234,567");
        assert_eq!(money_grouped(0.0), "R$ 0");
    }
}

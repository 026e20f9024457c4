//! German-locale number and date parsing
//!
//! Amounts look like `1.234.567,89 €`: `.` groups thousands, `,` separates
//! decimals. Without a comma, dots followed by groups of exactly three digits
//! are grouping (`600.000`). A single dot before anything else is a decimal
//! point (`1234.5`).

use super::ParsedAmount;
use chrono::NaiveDate;

/// Parse a monetary text field, falling back to an invalid marker
pub fn parse_amount(text: &str) -> ParsedAmount {
    match parse_number(text) {
        Some(value) => ParsedAmount::Valid(value),
        None => ParsedAmount::Invalid { raw: text.to_string() },
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('€')
        .trim_start_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        // German: strip grouping dots, comma becomes the decimal point
        let (whole, frac) = cleaned.rsplit_once(',')?;
        if frac.contains('.') {
            return None;
        }
        format!("{}.{}", whole.replace('.', ""), frac)
    } else if is_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else if cleaned.matches('.').count() > 1 {
        return None;
    } else {
        cleaned
    };

    if !normalized
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && c == '-'))
    {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `600.000`, `-1.000.000`: leading group of 1-3 digits, then `.ddd` groups
fn is_grouped(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut groups = digits.split('.');
    let lead_ok = groups
        .next()
        .map_or(false, |g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    let mut rest = groups.peekable();
    lead_ok
        && rest.peek().is_some()
        && rest.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse `DD.MM.YYYY` or ISO `YYYY-MM-DD`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_german_amounts() {
        assert_abs_diff_eq!(parse_amount("600.000,00").value(), 600_000.0);
        assert_abs_diff_eq!(parse_amount("1.234.567,89 €").value(), 1_234_567.89, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_amount("  750000 ").value(), 750_000.0);
        assert_abs_diff_eq!(parse_amount("-12,5").value(), -12.5);
        assert_abs_diff_eq!(parse_amount("1.000.000").value(), 1_000_000.0);
        assert_abs_diff_eq!(parse_amount("1234.5").value(), 1234.5);
    }

    #[test]
    fn test_single_thousands_group() {
        assert_eq!(parse_amount("600.000"), ParsedAmount::Valid(600_000.0));
        assert_eq!(parse_amount("750.000 €"), ParsedAmount::Valid(750_000.0));
        assert_eq!(parse_amount("-1.500"), ParsedAmount::Valid(-1_500.0));
        assert_eq!(parse_amount("12.50"), ParsedAmount::Valid(12.5));
    }

    #[test]
    fn test_unparseable_amounts_are_marked() {
        for raw in ["", "abc", "12,5,3", "1,2.3", "12-3", "€", "1.2.3", "1.000.00"] {
            let parsed = parse_amount(raw);
            assert!(!parsed.is_valid(), "{:?} should be invalid", raw);
            assert_eq!(parsed.value(), 0.0);
        }
        assert_eq!(
            parse_amount("abc"),
            ParsedAmount::Invalid { raw: "abc".to_string() }
        );
    }

    #[test]
    fn test_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(parse_date("16.10.2026"), Some(expected));
        assert_eq!(parse_date("2026-10-16"), Some(expected));
        assert_eq!(parse_date("31.02.2026"), None);
        assert_eq!(parse_date(""), None);
    }
}

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Format an amount with thousand separators, 2 decimal places and the
/// currency label, e.g. `1234567.89` → `"1,234,567.89 DA"`.
pub(crate) fn format_amount(val: Decimal, currency: &str) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{with_commas}.{dec_part}")
    } else {
        format!("{sign}{with_commas}.{dec_part} {currency}")
    }
}

/// Format an `f64` series value the same way, rounded to whole units.
pub(crate) fn format_whole(val: f64, currency: &str) -> String {
    let rounded = Decimal::try_from(val.round()).unwrap_or(Decimal::ZERO);
    format_amount(rounded, currency).replacen(".00", "", 1)
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Parse a user-typed amount, accepting thousands separators.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned).with_context(|| format!("Invalid amount: '{s}'"))
}

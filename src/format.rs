//! Amount formatting and parsing.
//!
//! All report-facing money strings go through this module so the grouping
//! and currency conventions stay in one place.

use rust_decimal::Decimal;

/// Normalize a raw amount string for display.
///
/// Strips everything except digits and `.`, collapses extra decimal points
/// onto the first one, trims leading zeros, truncates the fraction to two
/// digits and groups the integer part with commas. Returns `""` for empty
/// or unparsable input. Partially-typed values are tolerated, so a trailing
/// `.` survives:
///
/// ```
/// use ledger_reports::format::format_amount;
///
/// assert_eq!(format_amount("1234567.5"), "1,234,567.5");
/// assert_eq!(format_amount("12."), "12.");
/// assert_eq!(format_amount("abc"), "");
/// ```
pub fn format_amount(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return String::new();
    }

    let (int_raw, fraction) = match cleaned.split_once('.') {
        Some((int_part, rest)) => {
            // Anything after the first dot folds into the fraction.
            let fraction: String = rest.chars().filter(char::is_ascii_digit).collect();
            (int_part.to_string(), Some(fraction))
        }
        None => (cleaned, None),
    };

    // A bare "." (or ".." etc.) does not coerce to a number.
    if int_raw.is_empty() && fraction.as_deref().unwrap_or("").is_empty() {
        return String::new();
    }

    let int_part = int_raw.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let grouped = group_thousands(int_part);

    match fraction {
        None => grouped,
        Some(mut fraction) => {
            fraction.truncate(2);
            format!("{grouped}.{fraction}")
        }
    }
}

/// Parse a display string produced by [`format_amount`] back into a number.
///
/// Returns `f64::NAN` for unparsable input; callers must check before
/// trusting the result.
pub fn parse_formatted_amount(display: &str) -> f64 {
    display.replace(',', "").parse::<f64>().unwrap_or(f64::NAN)
}

/// Format the magnitude of a `Decimal`, truncated to two places and grouped.
pub fn format_decimal(value: Decimal) -> String {
    let magnitude = value.abs().trunc_with_scale(2).normalize();
    format_amount(&magnitude.to_string())
}

/// Format the magnitude of a `Decimal` as report currency, e.g. `Rs. 1,500/-`.
pub fn format_currency(value: Decimal) -> String {
    format!("Rs. {}/-", format_decimal(value))
}

/// Format a fee percentage, e.g. `10%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_decimal(value))
}

/// Insert a comma every 3 digits from the right.
fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

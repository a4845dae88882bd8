//! Pure formatting helpers shared by module templates.
//!
//! Number, currency, and date formatting follow the Spanish-locale
//! conventions of the original dashboard (`1.234,56 €`, `dd/mm/yyyy`). All
//! helpers are side-effect free and total: unparseable input is passed
//! through or rendered as a placeholder, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Groups an integer with `.` thousands separators: `1234567` → `1.234.567`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount as euros: `1234.5` → `1.234,50 €`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, format_number(whole), fraction)
}

/// Formats an ISO-8601 date or datetime string as `dd/mm/yyyy`.
///
/// Empty input renders as `-`; unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    match parse_datetime(value) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// Formats an ISO-8601 datetime string as `dd/mm/yyyy HH:MM`.
///
/// Empty input renders as `-`; unparseable input is returned unchanged.
pub fn format_date_time(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    match parse_datetime(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// Parses the datetime shapes the server is known to emit.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
        assert_eq!(format_number(-45678), "-45.678");
    }

    #[test]
    fn currency_uses_comma_decimals_and_euro_sign() {
        assert_eq!(format_currency(0.0), "0,00 €");
        assert_eq!(format_currency(1234.5), "1.234,50 €");
        assert_eq!(format_currency(-9.99), "-9,99 €");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency(1.005), "1,01 €");
    }

    #[test]
    fn date_formats_iso_inputs() {
        assert_eq!(format_date("2026-08-06T12:34:56"), "06/08/2026");
        assert_eq!(format_date("2026-08-06"), "06/08/2026");
    }

    #[test]
    fn date_time_formats_iso_inputs() {
        assert_eq!(format_date_time("2026-08-06T12:34:56"), "06/08/2026 12:34");
        assert_eq!(
            format_date_time("2026-08-06 07:05:00"),
            "06/08/2026 07:05"
        );
    }

    #[test]
    fn empty_dates_render_placeholder() {
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date_time(""), "-");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date_time("soon"), "soon");
    }
}

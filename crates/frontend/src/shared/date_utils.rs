//! Date formatting for the Brazilian locale.

use chrono::{Local, NaiveDate};
use contracts::shared::normalize::parse_backend_date;

/// Today in the browser's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Any date the backend sends -> DD/MM/YYYY.
/// Example: "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(input: &str) -> String {
    match parse_backend_date(input) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => input.to_string(),
    }
}

/// ISO date for `<input type="date">` values.
pub fn to_input_date(input: &str) -> String {
    parse_backend_date(input)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("15/03/2024"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(to_input_date("invalid"), "");
        assert_eq!(to_input_date("15/03/2024"), "2024-03-15");
    }
}

/// Utilities for date, time and amount formatting
///
/// The API sends ISO timestamps, sometimes with an offset and sometimes naive.
use chrono::{DateTime, NaiveDateTime};

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// Format ISO datetime string to DD/MM/YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(value: &str) -> String {
    parse_iso(value)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Whole euros with Spanish thousands separators: 15000.0 -> "15.000 €"
pub fn format_euros(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    format!("{} €", out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59.654321"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31T23:59:59+00:00"), "31/12/2024 23:59");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
    }

    #[test]
    fn test_format_euros() {
        assert_eq!(format_euros(15000.0), "15.000 €");
        assert_eq!(format_euros(999.4), "999 €");
        assert_eq!(format_euros(1234567.0), "1.234.567 €");
        assert_eq!(format_euros(0.0), "0 €");
    }
}

//! Display formatting helpers

use chrono::{DateTime, Local, Utc};

/// Format an amount with thousands separators and two decimals: `1234.5` -> `1,234.50`
pub fn format_currency(value: &str) -> String {
    let amount = match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return value.to_string(),
    };

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// Local-time display string for a stored timestamp
pub fn format_local_date(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// `YYYYMMDDHHMMSS` in UTC, used in export file names
pub fn format_filename_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("0"), "0.00");
        assert_eq!(format_currency("12.345"), "12.35");
        assert_eq!(format_currency("1234.5"), "1,234.50");
        assert_eq!(format_currency("1234567.891"), "1,234,567.89");
        assert_eq!(format_currency("-1500"), "-1,500.00");
        assert_eq!(format_currency("abc"), "abc");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1_048_576 / 2), "1.5 MB");
    }

    #[test]
    fn test_format_filename_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_filename_timestamp(&ts), "20240309140507");
    }
}

//! ROC (Republic of China) calendar dates.
//!
//! The bulletin writes dates as `113/01/05` in its header and `113.12.01`
//! in the effective-date column; year 1 ROC is 1912.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{BulletinError, Result};
use crate::text::normalize_digits;

/// Offset between the ROC era and the Gregorian year.
pub const ROC_YEAR_OFFSET: i32 = 1911;

/// Separator used by effective-date fields.
pub const DEFAULT_SEPARATOR: char = '.';

// ASCII classes on purpose: callers fold full-width digits first.
static DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3}/[0-9]{2}/[0-9]{2}").expect("valid date regex"));

/// Find the first `YYY/MM/DD` ROC token in `text`.
///
/// Only ASCII digits match; run [`normalize_digits`] over bulletin text first.
pub fn extract_date_token(text: &str) -> Result<&str> {
    DATE_TOKEN_RE
        .find(text)
        .map(|m| m.as_str())
        .ok_or_else(|| BulletinError::DateTokenNotFound {
            text: text.to_string(),
        })
}

/// Convert an ROC date token like `113.12.01` into a Gregorian date.
/// Full-width digits (`１１３.０１.０８`) are accepted.
pub fn roc_to_gregorian(token: &str, separator: char) -> Result<NaiveDate> {
    let invalid = |reason: String| BulletinError::InvalidDateFormat {
        token: token.to_string(),
        separator,
        reason,
    };

    let ascii = normalize_digits(token);
    let parts: Vec<&str> = ascii.split(separator).collect();
    let [y, m, d] = parts.as_slice() else {
        return Err(invalid(format!("expected 3 parts, got {}", parts.len())));
    };

    let year: i32 = y
        .trim()
        .parse()
        .map_err(|_| invalid(format!("year {y:?} is not a number")))?;
    let month: u32 = m
        .trim()
        .parse()
        .map_err(|_| invalid(format!("month {m:?} is not a number")))?;
    let day: u32 = d
        .trim()
        .parse()
        .map_err(|_| invalid(format!("day {d:?} is not a number")))?;

    let year = year
        .checked_add(ROC_YEAR_OFFSET)
        .ok_or_else(|| invalid("year out of range".to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid("not a calendar date".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_roc_to_gregorian() {
        assert_eq!(roc_to_gregorian("113.12.01", '.').unwrap(), ymd(2024, 12, 1));
        assert_eq!(roc_to_gregorian("113/04/01", '/').unwrap(), ymd(2024, 4, 1));
        assert_eq!(
            roc_to_gregorian("113.01.05", DEFAULT_SEPARATOR).unwrap(),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn test_roc_to_gregorian_rejects_garbage() {
        let err = roc_to_gregorian("億萬", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));

        // right shape, wrong separator
        let err = roc_to_gregorian("113/04/01", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));

        let err = roc_to_gregorian("113.01.32", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));

        let err = roc_to_gregorian("113.01.05.1", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));

        // year overflows i32 once the era offset is added
        let err = roc_to_gregorian("2147483647.01.01", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));

        // fits i32 but not chrono's range
        let err = roc_to_gregorian("999999999.01.01", '.').unwrap_err();
        assert!(matches!(err, BulletinError::InvalidDateFormat { .. }));
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(roc_to_gregorian("113.02.29", '.').unwrap(), ymd(2024, 2, 29));
        assert!(roc_to_gregorian("112.02.29", '.').is_err());
    }

    #[test]
    fn test_extract_date_token() {
        assert_eq!(extract_date_token("uin2o113/01/05ioewjr").unwrap(), "113/01/05");
        assert_eq!(
            extract_date_token("資料日期：113/03/20 及 113/03/21").unwrap(),
            "113/03/20"
        );

        let err = extract_date_token("億萬").unwrap_err();
        assert!(matches!(err, BulletinError::DateTokenNotFound { .. }));
    }

    #[test]
    fn test_fullwidth_digits() {
        let header = normalize_digits("資料日期：１１３/０１/０５");
        let token = extract_date_token(&header).unwrap();
        assert_eq!(token, "113/01/05");
        assert_eq!(roc_to_gregorian(token, '/').unwrap(), ymd(2024, 1, 5));

        assert_eq!(roc_to_gregorian("１１３.０１.０８", '.').unwrap(), ymd(2024, 1, 8));
    }
}

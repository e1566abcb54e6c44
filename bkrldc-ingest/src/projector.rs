//! Projection of raw rows into the published table.

use bkrldc_core::{
    BulletinError, DEFAULT_SEPARATOR, Result, decode_magnitude, normalize_digits,
    roc_to_gregorian,
};
use chrono::NaiveDate;

use crate::types::{Bulletin, Column, FinalRecord, RawRecord};

/// `01(新增)` -> (`01`, `新增`)
fn split_transaction(raw: &str) -> (String, String) {
    match raw.split_once('(') {
        Some((code, kind)) => (code.to_string(), kind.replace(')', "")),
        None => (raw.to_string(), String::new()),
    }
}

/// `004 臺灣銀行` -> (`004`, `臺灣銀行`)
fn split_bank(raw: &str) -> (String, String) {
    match raw.split_once(' ') {
        Some((code, name)) => (code.to_string(), name.trim().to_string()),
        None => (raw.to_string(), String::new()),
    }
}

fn required<'a>(record: &'a RawRecord, column: Column) -> Result<&'a str> {
    record
        .get(column)
        .ok_or_else(|| BulletinError::MalformedRow {
            line: record
                .iter()
                .filter_map(|(_, v)| v)
                .collect::<Vec<_>>()
                .join(" "),
            reason: format!("missing column {}", column.name()),
        })
}

pub fn project_record(record: &RawRecord, reference_date: NaiveDate) -> Result<FinalRecord> {
    let (transaction_code, transaction_type) =
        split_transaction(required(record, Column::TransactionId)?);
    let (bank_code, bank_name) = split_bank(record.get(Column::Bank).unwrap_or_default());

    let amount_text = normalize_digits(required(record, Column::Amount)?);
    let amount = decode_magnitude(&amount_text)?;

    let effective = record
        .get(Column::EffectiveDate)
        .ok_or_else(|| BulletinError::DateTokenNotFound {
            text: format!("<no {} column>", Column::EffectiveDate.name()),
        })?;
    let effective_date = roc_to_gregorian(effective, DEFAULT_SEPARATOR)?;

    let owned = |column: Column| record.get(column).map(str::to_string);

    Ok(FinalRecord {
        reference_date,
        transaction_code,
        transaction_type,
        bank_code,
        bank_name,
        rate_name: owned(Column::RateName),
        tenor: record.get(Column::Tenor).map(normalize_digits),
        amount_text,
        amount,
        effective_date,
        fixed_rate: owned(Column::FixedRate),
        floating_rate: owned(Column::FloatingRate),
    })
}

/// Project every record; the first failing row aborts with its index attached.
pub fn project(bulletin: &Bulletin) -> Result<Vec<FinalRecord>> {
    bulletin
        .records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            project_record(record, bulletin.reference_date).map_err(|e| e.at_row(row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(tokens: &[&str], bank: &str) -> RawRecord {
        let mut rec = RawRecord::from_tokens(tokens);
        rec.set(Column::Bank, bank);
        rec
    }

    #[test]
    fn test_project_full_row() {
        let rec = record(
            &["01(新增)", "定期存款", "１年", "５仟６佰萬", "113.01.08", "1.600", "1.585"],
            "004 臺灣銀行",
        );
        let out = project_record(&rec, date(2024, 1, 5)).unwrap();

        assert_eq!(out.reference_date, date(2024, 1, 5));
        assert_eq!(out.transaction_code, "01");
        assert_eq!(out.transaction_type, "新增");
        assert_eq!(out.bank_code, "004");
        assert_eq!(out.bank_name, "臺灣銀行");
        assert_eq!(out.tenor.as_deref(), Some("1年"));
        assert_eq!(out.amount_text, "5仟6佰萬");
        assert_eq!(out.amount, 56_000_000);
        assert_eq!(out.effective_date, date(2024, 1, 8));
        assert_eq!(out.fixed_rate.as_deref(), Some("1.600"));
        assert_eq!(out.floating_rate.as_deref(), Some("1.585"));
    }

    #[test]
    fn test_missing_optional_columns_stay_empty() {
        let rec = record(&["03(刪除)", "定期存款", "", "1億", "113.02.01", "1.700"], "");
        let out = project_record(&rec, date(2024, 1, 5)).unwrap();
        assert_eq!(out.floating_rate, None);
        assert_eq!(out.tenor.as_deref(), Some(""));
        assert_eq!(out.bank_code, "");
        assert_eq!(out.bank_name, "");
    }

    #[test]
    fn test_transaction_without_parenthesis() {
        assert_eq!(split_transaction("01"), ("01".to_string(), String::new()));
        assert_eq!(split_transaction("01(新增)"), ("01".to_string(), "新增".to_string()));
    }

    #[test]
    fn test_non_numeric_amount_is_row_error() {
        let bulletin = Bulletin {
            reference_date: date(2024, 1, 5),
            records: vec![
                record(&["01(新增)", "定期存款", "1年", "1億", "113.01.08"], "004 臺灣銀行"),
                record(&["01(新增)", "活期存款", "-", "一般", "113.01.08"], "004 臺灣銀行"),
            ],
        };
        let err = project(&bulletin).unwrap_err();
        assert!(matches!(err, BulletinError::Row { row: 1, .. }));
        assert!(matches!(err.root(), BulletinError::UnknownCharacter { .. }));
    }

    #[test]
    fn test_fullwidth_effective_date() {
        let rec = record(&["01(新增)", "定期存款", "1年", "1億", "１１３.０１.０８"], "004 臺灣銀行");
        let out = project_record(&rec, date(2024, 1, 5)).unwrap();
        assert_eq!(out.effective_date, date(2024, 1, 8));
    }

    #[test]
    fn test_missing_effective_date() {
        let rec = record(&["01(新增)", "定期存款", "1年", "1億"], "004 臺灣銀行");
        let err = project_record(&rec, date(2024, 1, 5)).unwrap_err();
        assert!(matches!(err, BulletinError::DateTokenNotFound { .. }));
    }

    #[test]
    fn test_missing_amount() {
        let rec = record(&["01(新增)", "定期存款", "1年"], "004 臺灣銀行");
        let err = project_record(&rec, date(2024, 1, 5)).unwrap_err();
        assert!(matches!(err, BulletinError::MalformedRow { .. }));
    }
}

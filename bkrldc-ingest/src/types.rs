use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw bulletin columns, in the order tokens appear on a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    TransactionId,
    RateName,
    Tenor,
    Amount,
    EffectiveDate,
    FixedRate,
    FloatingRate,
    Bank,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::TransactionId,
        Column::RateName,
        Column::Tenor,
        Column::Amount,
        Column::EffectiveDate,
        Column::FixedRate,
        Column::FloatingRate,
        Column::Bank,
    ];

    /// Column heading as printed in the bulletin.
    pub fn name(self) -> &'static str {
        match self {
            Column::TransactionId => "異動識別碼(異動別)",
            Column::RateName => "牌告利率名稱",
            Column::Tenor => "存期",
            Column::Amount => "額度",
            Column::EffectiveDate => "生效日期",
            Column::FixedRate => "固定",
            Column::FloatingRate => "機動",
            Column::Bank => "銀行",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One data row keyed by [`Column`]; `None` marks a column the row did not supply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: [Option<String>; 8],
}

impl RawRecord {
    /// Zip row tokens onto the schema in order. Tokens past the last column are dropped.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut record = RawRecord::default();
        for (column, token) in Column::ALL.iter().zip(tokens) {
            record.set(*column, token.as_ref());
        }
        record
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.fields[column.index()].as_deref()
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.fields[column.index()] = Some(value.into());
    }

    /// `(column, value)` pairs in schema order, including empty columns.
    pub fn iter(&self) -> impl Iterator<Item = (Column, Option<&str>)> + '_ {
        Column::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

/// Assembler output: the bulletin's reference date plus its raw rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    pub reference_date: NaiveDate,
    pub records: Vec<RawRecord>,
}

/// A projected output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    #[serde(rename = "資料日期")]
    pub reference_date: NaiveDate,
    #[serde(rename = "異動識別碼")]
    pub transaction_code: String,
    #[serde(rename = "異動別")]
    pub transaction_type: String,
    #[serde(rename = "銀行代碼")]
    pub bank_code: String,
    #[serde(rename = "銀行名稱")]
    pub bank_name: String,
    #[serde(rename = "牌告利率名稱")]
    pub rate_name: Option<String>,
    #[serde(rename = "存期")]
    pub tenor: Option<String>,
    /// Amount as written, with digits folded to ASCII.
    #[serde(rename = "額度")]
    pub amount_text: String,
    #[serde(rename = "amounts")]
    pub amount: u64,
    #[serde(rename = "生效日期")]
    pub effective_date: NaiveDate,
    #[serde(rename = "固定")]
    pub fixed_rate: Option<String>,
    #[serde(rename = "機動")]
    pub floating_rate: Option<String>,
}

impl FinalRecord {
    /// Header row, matching the serialized field order.
    pub const HEADERS: [&'static str; 12] = [
        "資料日期",
        "異動識別碼",
        "異動別",
        "銀行代碼",
        "銀行名稱",
        "牌告利率名稱",
        "存期",
        "額度",
        "amounts",
        "生效日期",
        "固定",
        "機動",
    ];
}

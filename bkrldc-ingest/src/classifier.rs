//! Per-line classification of bulletin body text.
//!
//! Expected body layout after Big5 decoding (columns separated by full-width spaces):
//!   004　臺灣銀行
//!   01(新增)　定期存款　１年　５仟萬　113.01.08　1.600　1.585
//!   02(修改)　無實體定存　５仟６佰萬　113.01.08　1.650　1.600
//!   ------------------------------------------------------------

use std::sync::LazyLock;

use bkrldc_core::normalize_line;
use regex::Regex;

/// Marker for deposits issued without a paper certificate. Those rows omit the tenor column.
pub const NO_PHYSICAL_CERTIFICATE: &str = "無實體";

/// Column index the missing tenor is restored at.
const TENOR_INDEX: usize = 2;

/// Rows with fewer tokens than this are group headers.
const MIN_DATA_TOKENS: usize = 3;

static TERMINATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{5,}").expect("valid terminator regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Section separator; the body ends here.
    Terminator,
    /// A bank name line; `label` is the normalized text, e.g. `004 臺灣銀行`.
    GroupHeader { label: String },
    DataRow(RowShape),
}

/// How a data row lines up with the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowShape {
    Full(Vec<String>),
    /// Tenor restored as an empty token at index 2.
    NoPhysicalCertificate(Vec<String>),
    Malformed { tokens: Vec<String>, reason: String },
}

impl RowShape {
    pub fn tokens(&self) -> &[String] {
        match self {
            RowShape::Full(tokens) | RowShape::NoPhysicalCertificate(tokens) => tokens,
            RowShape::Malformed { tokens, .. } => tokens,
        }
    }
}

pub fn is_terminator(line: &str) -> bool {
    TERMINATOR_RE.is_match(line)
}

/// Split a line into non-empty tokens after folding full-width spaces.
pub fn tokenize(line: &str) -> Vec<String> {
    normalize_line(line)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn classify_line(line: &str) -> LineKind {
    if is_terminator(line) {
        return LineKind::Terminator;
    }

    let mut tokens = tokenize(line);
    let repaired = line.contains(NO_PHYSICAL_CERTIFICATE);
    let original_len = tokens.len();
    if repaired {
        tokens.insert(TENOR_INDEX.min(tokens.len()), String::new());
    }

    if tokens.len() < MIN_DATA_TOKENS {
        return LineKind::GroupHeader {
            label: normalize_line(line),
        };
    }

    let shape = if !repaired {
        RowShape::Full(tokens)
    } else if original_len <= TENOR_INDEX {
        RowShape::Malformed {
            tokens,
            reason: format!(
                "{NO_PHYSICAL_CERTIFICATE} row has {original_len} tokens, nothing follows the tenor column"
            ),
        }
    } else {
        RowShape::NoPhysicalCertificate(tokens)
    };

    LineKind::DataRow(shape)
}

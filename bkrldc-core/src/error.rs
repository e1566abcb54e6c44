//! Error kinds raised while decoding a bulletin.

use thiserror::Error;

/// Result alias for bulletin decoding.
pub type Result<T> = std::result::Result<T, BulletinError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulletinError {
    /// No `\d{3}/\d{2}/\d{2}` token where one is required.
    #[error("cannot find an ROC date in {text:?}")]
    DateTokenNotFound { text: String },

    /// An ROC token that does not split into a valid year/month/day.
    #[error("invalid ROC date {token:?} (separator {separator:?}): {reason}")]
    InvalidDateFormat {
        token: String,
        separator: char,
        reason: String,
    },

    #[error("unknown character {ch:?} in amount {input:?}")]
    UnknownCharacter { ch: char, input: String },

    #[error("there is no number in amount {input:?}")]
    NoDigitsPresent { input: String },

    /// A magnitude unit with no digit run in front of it, e.g. `1億仟`.
    #[error("unit {unit:?} has no digits before it in amount {input:?}")]
    DanglingUnit { unit: char, input: String },

    #[error("amount {input:?} does not fit in 64 bits")]
    AmountOverflow { input: String },

    #[error("malformed row {line:?}: {reason}")]
    MalformedRow { line: String, reason: String },

    /// Wraps a failure with the index of the record (or body line) it came from.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<BulletinError>,
    },
}

impl BulletinError {
    /// Attach a record index to this error.
    pub fn at_row(self, row: usize) -> Self {
        BulletinError::Row {
            row,
            source: Box::new(self),
        }
    }

    /// The innermost error kind, looking through row context.
    pub fn root(&self) -> &BulletinError {
        match self {
            BulletinError::Row { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_row_context() {
        let err = BulletinError::NoDigitsPresent {
            input: "一般".to_string(),
        }
        .at_row(3)
        .at_row(4);

        assert!(matches!(err.root(), BulletinError::NoDigitsPresent { .. }));
        assert!(err.to_string().starts_with("row 4: row 3:"));
    }
}

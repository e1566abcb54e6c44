//! Folds classified body lines into raw records.

use bkrldc_core::{
    BulletinError, Result, extract_date_token, normalize_digits, roc_to_gregorian,
};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::classifier::{LineKind, RowShape, classify_line};
use crate::types::{Bulletin, Column, RawRecord};

/// Lines 0..HEADER_LINES hold the title and metadata.
pub const HEADER_LINES: usize = 7;

/// Index of the header line carrying the reference date (`YYY/MM/DD`).
pub const DATE_LINE: usize = 2;

/// Separator of the reference date in the header.
const HEADER_DATE_SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Reducer state for one bulletin.
#[derive(Debug, Default)]
pub struct AssemblerState {
    current_group: String,
    records: Vec<RawRecord>,
    finished: bool,
    /// Body lines fed so far.
    lines_seen: usize,
}

impl AssemblerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Classify one body line and apply it. A malformed row fails with
    /// its 0-based body line index attached.
    pub fn feed(&mut self, line: &str) -> Result<Flow> {
        if self.finished {
            return Ok(Flow::Stop);
        }
        let index = self.lines_seen;
        self.lines_seen += 1;

        match classify_line(line) {
            LineKind::Terminator => {
                info!("finished to process all rows");
                self.finished = true;
                Ok(Flow::Stop)
            }
            LineKind::GroupHeader { label } => {
                info!("{label}, starts processing.");
                self.current_group = label;
                Ok(Flow::Continue)
            }
            LineKind::DataRow(RowShape::Malformed { tokens, reason }) => {
                Err(BulletinError::MalformedRow {
                    line: tokens.join(" "),
                    reason,
                }
                .at_row(index))
            }
            LineKind::DataRow(shape) => {
                let mut record = RawRecord::from_tokens(shape.tokens());
                record.set(Column::Bank, self.current_group.clone());
                debug!(group = %self.current_group, tokens = shape.tokens().len(), "row");
                self.records.push(record);
                Ok(Flow::Continue)
            }
        }
    }

    pub fn into_records(self) -> Vec<RawRecord> {
        self.records
    }
}

/// Fold body lines (already past the header) into records.
pub fn assemble<S: AsRef<str>>(body: &[S]) -> Result<Vec<RawRecord>> {
    let mut state = AssemblerState::new();
    for line in body {
        if state.feed(line.as_ref())? == Flow::Stop {
            break;
        }
    }
    Ok(state.into_records())
}

/// Reference date from the header's third line.
pub fn reference_date<S: AsRef<str>>(lines: &[S]) -> Result<NaiveDate> {
    let line = lines
        .get(DATE_LINE)
        .map(|l| l.as_ref())
        .ok_or_else(|| BulletinError::DateTokenNotFound {
            text: format!("<bulletin has only {} lines>", lines.len()),
        })?;
    let line = normalize_digits(line);
    let token = extract_date_token(&line)?;
    roc_to_gregorian(token, HEADER_DATE_SEPARATOR)
}

/// Parse a whole bulletin: reference date plus raw rows.
pub fn parse_bulletin<S: AsRef<str>>(lines: &[S]) -> Result<Bulletin> {
    let reference_date = reference_date(lines)?;
    let body = lines.get(HEADER_LINES..).unwrap_or(&[]);
    let records = assemble(body)?;
    Ok(Bulletin {
        reference_date,
        records,
    })
}

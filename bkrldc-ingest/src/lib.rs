//! bkrldc-ingest: turns decoded bulletin text into deposit-rate records.

pub mod assembler;
pub mod classifier;
pub mod projector;
pub mod types;

pub use assembler::{AssemblerState, Flow, assemble, parse_bulletin};
pub use classifier::{LineKind, RowShape, classify_line};
pub use projector::{project, project_record};
pub use types::{Bulletin, Column, FinalRecord, RawRecord};

use bkrldc_core::Result;

/// Decoded bulletin text straight to the final table.
pub fn parse_table(text: &str) -> Result<(Bulletin, Vec<FinalRecord>)> {
    let lines: Vec<&str> = text.lines().collect();
    let bulletin = parse_bulletin(&lines)?;
    let table = project(&bulletin)?;
    Ok((bulletin, table))
}

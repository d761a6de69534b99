// File: crates/stream-core/src/error.rs
// Summary: Error type surfaced by the record parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

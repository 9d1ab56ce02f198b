//! Rule-based extraction of one anthology entry.
//!
//! A raw block goes through four stages:
//!
//! 1. [`normalize`] flattens it into one cleaned line.
//! 2. [`extract_attribution`] cuts off the trailing `_..._` source span.
//! 3. [`parse_entry`] splits original from translation and resolves the
//!    attribution to a language of origin.
//! 4. [`format_output`] arranges the fields into a [`ParsedRecord`].

pub mod abbreviation;
pub mod attribution;
pub mod entry;
pub mod format;
pub mod normalize;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use abbreviation::{expand, join_expanded};
pub use attribution::{Attribution, Extraction, extract_attribution};
pub use entry::{EntryFields, parse_entry};
pub use format::format_output;
pub use normalize::normalize;
pub use resolve::{Resolution, resolve};

use crate::models::{ParsedRecord, ReferenceTables};

/// Why a single entry could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("translation should start with an em-dash marker: {text:?}")]
    FormatInvariantViolation { text: String },
    #[error("entry cannot be split as expected: {reason}")]
    StructuralParseFailure { reason: String },
}

impl EntryError {
    pub fn kind(&self) -> &'static str {
        match self {
            EntryError::FormatInvariantViolation { .. } => "FormatInvariantViolation",
            EntryError::StructuralParseFailure { .. } => "StructuralParseFailure",
        }
    }
}

/// Runs the whole pipeline over one raw block.
pub fn parse_block(raw: &str, tables: &ReferenceTables) -> Result<ParsedRecord, EntryError> {
    let normalized = normalize(raw);
    let Extraction { text, attribution } = extract_attribution(&normalized, tables);
    let fields = parse_entry(&text, attribution.as_ref(), tables)?;
    Ok(format_output(fields))
}

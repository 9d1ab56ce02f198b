pub mod record;
pub mod tables;
pub mod tally;

pub use record::{ParsedRecord, UNKNOWN_ORIGIN};
pub use tables::{AliasGroup, ReferenceTables, TablesError};
pub use tally::AuthorTally;

pub mod corpus;
pub mod io;
pub mod models;
pub mod parsing;
pub mod summary;

// Re-export key types for easier usage
pub use corpus::{CorpusDriver, CorpusReport, EntryFailure, process_blocks, process_file, process_reader};
pub use io::{BlockReader, IoError, RawBlock};
pub use models::{AuthorTally, ParsedRecord, ReferenceTables, TablesError, UNKNOWN_ORIGIN};
pub use parsing::{EntryError, parse_block};

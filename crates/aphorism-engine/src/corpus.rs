use std::io::BufRead;
use std::path::Path;

use crate::io::{BlockReader, IoError, RawBlock};
use crate::models::{AuthorTally, ParsedRecord, ReferenceTables};
use crate::parsing::{EntryError, parse_block};

/// An entry that was skipped, with the text that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub line: usize,
    pub block: String,
    pub error: EntryError,
}

/// Outcome of processing a whole corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    /// Records in input order.
    pub records: Vec<ParsedRecord>,
    pub failures: Vec<EntryFailure>,
    pub tally: AuthorTally,
}

impl CorpusReport {
    pub fn entries_seen(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Feeds blocks through the parser one at a time, keeping malformed
/// entries from stopping the run.
pub struct CorpusDriver<'a> {
    tables: &'a ReferenceTables,
    records: Vec<ParsedRecord>,
    failures: Vec<EntryFailure>,
}

impl<'a> CorpusDriver<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            tables,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn push(&mut self, block: &RawBlock) {
        let text = block.text();
        match parse_block(&text, self.tables) {
            Ok(record) => self.records.push(record),
            Err(error) => {
                log::warn!(
                    "Skipping entry at line {}: {}: {error}\n{text}",
                    block.line,
                    error.kind()
                );
                self.failures.push(EntryFailure {
                    line: block.line,
                    block: text,
                    error,
                });
            }
        }
    }

    pub fn finish(self) -> CorpusReport {
        let tally = AuthorTally::from_records(&self.records);
        log::info!(
            "Parsed {} entries, skipped {}, {} distinct sources",
            self.records.len(),
            self.failures.len(),
            tally.len()
        );

        CorpusReport {
            records: self.records,
            failures: self.failures,
            tally,
        }
    }
}

/// Processes already-read blocks.
pub fn process_blocks<I>(blocks: I, tables: &ReferenceTables) -> CorpusReport
where
    I: IntoIterator<Item = RawBlock>,
{
    let mut driver = CorpusDriver::new(tables);
    for block in blocks {
        driver.push(&block);
    }
    driver.finish()
}

/// Processes every block of a reader. Only a failure to read aborts.
pub fn process_reader<R: BufRead>(
    reader: R,
    tables: &ReferenceTables,
) -> Result<CorpusReport, IoError> {
    drive(BlockReader::new(reader), tables)
}

pub fn process_file(path: &Path, tables: &ReferenceTables) -> Result<CorpusReport, IoError> {
    log::info!("Reading corpus from {}", path.display());
    drive(BlockReader::open(path)?, tables)
}

fn drive<R: BufRead>(
    blocks: BlockReader<R>,
    tables: &ReferenceTables,
) -> Result<CorpusReport, IoError> {
    let mut driver = CorpusDriver::new(tables);
    for block in blocks {
        driver.push(&block?);
    }
    Ok(driver.finish())
}

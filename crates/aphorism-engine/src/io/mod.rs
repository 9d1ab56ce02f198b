use crate::corpus::{CorpusReport, EntryFailure};
use crate::models::{AuthorTally, ParsedRecord};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DATASET_FILE: &str = "dataset.csv";
pub const RECORD_LOG_FILE: &str = "log.txt";
pub const AUTHORS_FILE: &str = "authors.txt";
pub const ERRORS_FILE: &str = "errors.txt";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One anthology entry as it appears in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// 1-based line number of the block's first line.
    pub line: usize,
    pub lines: Vec<String>,
}

impl RawBlock {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Yields the blank-line separated blocks of a text source.
///
/// Runs of empty lines separate blocks without producing empty ones, and
/// the last block needs no trailing blank line. A line holding only spaces
/// is stray typesetting inside an entry and stays in its block.
pub struct BlockReader<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl BlockReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = Result<RawBlock, IoError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut block: Option<RawBlock> = None;

        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => break,
                Ok(_) => self.line_number += 1,
                Err(e) => return Some(Err(IoError::Io(e))),
            }

            let line = self.buf.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                if block.is_some() {
                    break;
                }
                continue;
            }

            block
                .get_or_insert_with(|| RawBlock {
                    line: self.line_number,
                    lines: Vec::new(),
                })
                .lines
                .push(line.to_string());
        }

        block.map(Ok)
    }
}

/// Write records as the tabular dataset, one row per record.
pub fn write_dataset(path: &Path, records: &[ParsedRecord]) -> Result<(), IoError> {
    create_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read records back from a dataset written by [`write_dataset`].
pub fn read_dataset(path: &Path) -> Result<Vec<ParsedRecord>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<ParsedRecord>, _>>()?;
    Ok(records)
}

/// Human-readable dump of every record, separated by blank lines.
pub fn write_record_log(path: &Path, records: &[ParsedRecord]) -> Result<(), IoError> {
    let mut out = create_file(path)?;
    for record in records {
        writeln!(out, "{record}\n")?;
    }
    out.flush()?;
    Ok(())
}

/// `label: count` lines, most frequent first.
pub fn write_author_tally(path: &Path, tally: &AuthorTally) -> Result<(), IoError> {
    let mut out = create_file(path)?;
    for (source, count) in tally.ranked() {
        writeln!(out, "{source}: {count}")?;
    }
    out.flush()?;
    Ok(())
}

/// Every skipped entry with its reason and raw text.
pub fn write_failures(path: &Path, failures: &[EntryFailure]) -> Result<(), IoError> {
    let mut out = create_file(path)?;
    for failure in failures {
        writeln!(
            out,
            "line {}: {}: {}\n{}\n",
            failure.line,
            failure.error.kind(),
            failure.error,
            failure.block
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Writes every output of a run into `dir`, creating it if needed.
pub fn write_report(dir: &Path, report: &CorpusReport) -> Result<(), IoError> {
    fs::create_dir_all(dir)?;
    write_dataset(&dir.join(DATASET_FILE), &report.records)?;
    write_record_log(&dir.join(RECORD_LOG_FILE), &report.records)?;
    write_author_tally(&dir.join(AUTHORS_FILE), &report.tally)?;
    write_failures(&dir.join(ERRORS_FILE), &report.failures)?;
    log::info!("Wrote results to {}", dir.display());
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>, IoError> {
    create_parent_dir(path)?;
    Ok(BufWriter::new(File::create(path)?))
}

fn create_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

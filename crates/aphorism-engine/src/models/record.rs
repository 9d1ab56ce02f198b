use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of an entry whose language could not be determined.
pub const UNKNOWN_ORIGIN: &str = "UNK";

/// One anthology entry in structured form.
///
/// `original` is always the non-English text and `translation` the English
/// text; an entry written in English has only a `translation`. Serialized
/// field names are the dataset's column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    #[serde(rename = "Aphorism Origin")]
    pub origin: String,
    #[serde(rename = "Original Text")]
    pub original: Option<String>,
    #[serde(rename = "English Translation")]
    pub translation: Option<String>,
    #[serde(rename = "Source Information")]
    pub source_info: Option<String>,
}

impl ParsedRecord {
    /// Whether the entry carries a non-English original.
    pub fn is_translated(&self) -> bool {
        self.original.is_some() && self.translation.is_some()
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("-")
        }

        writeln!(f, "origin: {}", self.origin)?;
        writeln!(f, "original: {}", field(&self.original))?;
        writeln!(f, "translation: {}", field(&self.translation))?;
        write!(f, "source: {}", field(&self.source_info))
    }
}

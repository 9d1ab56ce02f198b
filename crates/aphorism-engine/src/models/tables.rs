use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const BUNDLED_TABLES: &str = include_str!("../../data/reference_tables.toml");

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("Failed to read reference tables at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse reference tables: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Alias '{alias}' is claimed by both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },
}

/// A set of alternative names that all denote one author, e.g. play titles.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasGroup {
    pub author: String,
    pub aliases: Vec<String>,
}

/// On-disk shape of the reference data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TablesFile {
    author_languages: HashMap<String, String>,
    author_citations: HashMap<String, String>,
    origin_abbreviations: HashMap<String, String>,
    alias_groups: Vec<AliasGroup>,
}

/// Read-only lookup tables used to resolve attributions.
///
/// All keys are compared by exact string match against the
/// abbreviation-expanded attribution, so the data file must spell keys the
/// way the expansion produces them.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    author_languages: HashMap<String, String>,
    author_citations: HashMap<String, String>,
    origin_abbreviations: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

impl ReferenceTables {
    /// Tables shipped with the engine.
    pub fn bundled() -> Result<Self, TablesError> {
        Self::from_toml_str(BUNDLED_TABLES)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TablesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TablesError> {
        let file: TablesFile = toml::from_str(content)?;

        let mut tables = Self {
            author_languages: file.author_languages,
            author_citations: file.author_citations,
            origin_abbreviations: file.origin_abbreviations,
            aliases: HashMap::new(),
        };
        for group in file.alias_groups {
            tables.insert_aliases(&group.author, &group.aliases)?;
        }
        Ok(tables)
    }

    pub fn author_language(&self, author: &str) -> Option<&str> {
        self.author_languages.get(author).map(String::as_str)
    }

    pub fn author_citation(&self, author: &str) -> Option<&str> {
        self.author_citations.get(author).map(String::as_str)
    }

    pub fn origin_language(&self, abbreviation: &str) -> Option<&str> {
        self.origin_abbreviations
            .get(abbreviation)
            .map(String::as_str)
    }

    /// The author a known alias stands for.
    pub fn canonical_author(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn with_author(mut self, author: &str, language: &str) -> Self {
        self.author_languages
            .insert(author.to_string(), language.to_string());
        self
    }

    pub fn with_citation(mut self, author: &str, citation: &str) -> Self {
        self.author_citations
            .insert(author.to_string(), citation.to_string());
        self
    }

    pub fn with_origin(mut self, abbreviation: &str, language: &str) -> Self {
        self.origin_abbreviations
            .insert(abbreviation.to_string(), language.to_string());
        self
    }

    pub fn with_aliases(mut self, author: &str, aliases: &[&str]) -> Result<Self, TablesError> {
        let aliases: Vec<String> = aliases.iter().map(|a| a.to_string()).collect();
        self.insert_aliases(author, &aliases)?;
        Ok(self)
    }

    fn insert_aliases(&mut self, author: &str, aliases: &[String]) -> Result<(), TablesError> {
        for alias in aliases {
            match self.aliases.get(alias) {
                Some(existing) if existing != author => {
                    return Err(TablesError::ConflictingAlias {
                        alias: alias.clone(),
                        first: existing.clone(),
                        second: author.to_string(),
                    });
                }
                _ => {
                    self.aliases.insert(alias.clone(), author.to_string());
                }
            }
        }
        Ok(())
    }
}

use std::collections::HashMap;

use super::ParsedRecord;

/// How often each source label occurs across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTally {
    counts: HashMap<String, usize>,
}

impl AuthorTally {
    /// Counts the source label of every attributed record.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ParsedRecord>,
    {
        let mut tally = Self::default();
        for source in records
            .into_iter()
            .filter_map(|record| record.source_info.as_deref())
        {
            tally.add(source);
        }
        tally
    }

    pub fn add(&mut self, source: &str) {
        *self.counts.entry(source.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, source: &str) -> usize {
        self.counts.get(source).copied().unwrap_or(0)
    }

    /// Number of attributed records.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels by descending count, ties in label order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(source, count)| (source.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

//! Descriptive summaries of a parsed corpus: how the entries split by
//! language of origin, and how concentrated the attributions are.

use std::collections::HashMap;

use crate::models::{AuthorTally, ParsedRecord};

pub const OTHER_LABEL: &str = "Other";
pub const DEFAULT_OTHER_CUTOFF: f64 = 0.02;

/// Source labels that name a kind of saying rather than a person.
pub const GENERIC_AUTHORS: [&str; 5] = ["Proverb", "Maxim", "Anon", "Saying", "Quoted"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SummaryError {
    #[error("No records to summarize")]
    Empty,
    #[error("Cutoff must be between 0 and 1, got {0}")]
    InvalidCutoff(f64),
}

/// Fraction of records per origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginShares {
    /// Origins above the cutoff, largest first, followed by [`OTHER_LABEL`].
    pub shares: Vec<(String, f64)>,
    /// The small origins folded into [`OTHER_LABEL`].
    pub aggregated: Vec<(String, f64)>,
}

/// Shares of each origin, with every origin at or below `cutoff` folded
/// into a single "Other" share.
pub fn origin_shares(records: &[ParsedRecord], cutoff: f64) -> Result<OriginShares, SummaryError> {
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(SummaryError::InvalidCutoff(cutoff));
    }
    if records.is_empty() {
        return Err(SummaryError::Empty);
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.origin.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = records.len() as f64;
    let (shares, aggregated): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .map(|(origin, count)| (origin.to_string(), count as f64 / total))
        .partition(|(_, share)| *share > cutoff);

    let other = aggregated.iter().map(|(_, share)| share).sum();
    let mut shares = shares;
    shares.push((OTHER_LABEL.to_string(), other));

    Ok(OriginShares { shares, aggregated })
}

/// How many records keep a non-English original next to their translation,
/// and how many were English to begin with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationCounts {
    pub translated: usize,
    pub english_only: usize,
}

pub fn translation_counts(records: &[ParsedRecord]) -> TranslationCounts {
    let translated = records.iter().filter(|r| r.is_translated()).count();
    TranslationCounts {
        translated,
        english_only: records.len() - translated,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAuthor {
    /// 0-based position in the tally ranking.
    pub rank: usize,
    pub label: String,
    pub count: usize,
    pub generic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRanking {
    pub authors: Vec<RankedAuthor>,
    /// Number of attributed records.
    pub total: usize,
}

impl AuthorRanking {
    /// For each specific author, in rank order, the share of all attributed
    /// records covered by that author and every higher-ranked specific one.
    pub fn cumulative_specific_shares(&self) -> Vec<(usize, f64)> {
        if self.total == 0 {
            return Vec::new();
        }

        let mut covered = 0;
        self.authors
            .iter()
            .filter(|author| !author.generic)
            .map(|author| {
                covered += author.count;
                (author.rank, covered as f64 / self.total as f64)
            })
            .collect()
    }
}

pub fn author_ranking(tally: &AuthorTally) -> AuthorRanking {
    let authors = tally
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(rank, (label, count))| RankedAuthor {
            rank,
            label: label.to_string(),
            count,
            generic: GENERIC_AUTHORS.contains(&label),
        })
        .collect();

    AuthorRanking {
        authors,
        total: tally.total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(origins: &[(&str, usize)]) -> Vec<ParsedRecord> {
        origins
            .iter()
            .flat_map(|(origin, n)| {
                std::iter::repeat_n(
                    ParsedRecord {
                        origin: origin.to_string(),
                        original: None,
                        translation: Some("text".to_string()),
                        source_info: None,
                    },
                    *n,
                )
            })
            .collect()
    }

    #[test]
    fn test_small_origins_fold_into_other() {
        let records = records(&[("Latin", 60), ("French", 30), ("Welsh", 2), ("Danish", 8)]);

        let summary = origin_shares(&records, 0.05).unwrap();

        assert_eq!(
            summary.shares,
            vec![
                ("Latin".to_string(), 0.6),
                ("French".to_string(), 0.3),
                ("Danish".to_string(), 0.08),
                ("Other".to_string(), 0.02),
            ]
        );
        assert_eq!(summary.aggregated, vec![("Welsh".to_string(), 0.02)]);
    }

    #[test]
    fn test_share_equal_to_cutoff_is_folded() {
        let records = records(&[("Latin", 98), ("Welsh", 2)]);

        let summary = origin_shares(&records, 0.02).unwrap();

        assert_eq!(summary.aggregated, vec![("Welsh".to_string(), 0.02)]);
    }

    #[test]
    fn test_other_is_reported_even_when_empty() {
        let records = records(&[("Latin", 1)]);

        let summary = origin_shares(&records, DEFAULT_OTHER_CUTOFF).unwrap();

        assert_eq!(
            summary.shares,
            vec![("Latin".to_string(), 1.0), ("Other".to_string(), 0.0)]
        );
        assert!(summary.aggregated.is_empty());
    }

    #[test]
    fn test_origin_shares_rejects_bad_input() {
        assert_eq!(origin_shares(&[], 0.02), Err(SummaryError::Empty));
        assert_eq!(
            origin_shares(&records(&[("Latin", 1)]), 1.5),
            Err(SummaryError::InvalidCutoff(1.5))
        );
    }

    #[test]
    fn test_translation_counts() {
        let mut records = records(&[("UNK", 2)]);
        records.push(ParsedRecord {
            origin: "Latin".to_string(),
            original: Some("Festina lente.".to_string()),
            translation: Some("Hasten slowly.".to_string()),
            source_info: None,
        });

        assert_eq!(
            translation_counts(&records),
            TranslationCounts {
                translated: 1,
                english_only: 2,
            }
        );
        assert_eq!(translation_counts(&[]), TranslationCounts::default());
    }

    #[test]
    fn test_author_ranking_flags_generic_sources() {
        let mut tally = AuthorTally::default();
        for source in ["Proverb", "Proverb", "Proverb", "Horace", "Horace", "Maxim", "Ovid"] {
            tally.add(source);
        }

        let ranking = author_ranking(&tally);

        let flags: Vec<(&str, bool)> = ranking
            .authors
            .iter()
            .map(|a| (a.label.as_str(), a.generic))
            .collect();
        assert_eq!(
            flags,
            vec![("Proverb", true), ("Horace", false), ("Maxim", true), ("Ovid", false)]
        );
        assert_eq!(ranking.total, 7);
    }

    #[test]
    fn test_cumulative_specific_shares() {
        let mut tally = AuthorTally::default();
        for source in ["Proverb", "Proverb", "Horace", "Horace", "Ovid", "Maxim", "Virgil", "Pope"] {
            tally.add(source);
        }

        let shares = author_ranking(&tally).cumulative_specific_shares();

        // Ranking: Horace 2, Proverb 2, Maxim 1, Ovid 1, Pope 1, Virgil 1.
        assert_eq!(
            shares,
            vec![(0, 0.25), (3, 0.375), (4, 0.5), (5, 0.625)]
        );
    }

    #[test]
    fn test_empty_tally_has_no_shares() {
        let ranking = author_ranking(&AuthorTally::default());
        assert!(ranking.authors.is_empty());
        assert!(ranking.cumulative_specific_shares().is_empty());
    }
}

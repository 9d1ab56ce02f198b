//! Resolution of an attribution to a language of origin and a source label.
//!
//! Rules are tried in order and the first one that applies wins. When none
//! applies the attribution is kept verbatim (expanded) and translated
//! entries fall back to Latin, which is what untraceable attributions in
//! this anthology overwhelmingly are.

use super::abbreviation::join_expanded;
use super::attribution::Attribution;
use crate::models::{ReferenceTables, UNKNOWN_ORIGIN};

pub const FALLBACK_ORIGIN: &str = "Latin";

const LAW_TOKENS: [&str; 2] = ["L", "Law"];
const LAW_LABEL: &str = "Law";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub origin: String,
    pub source_info: Option<String>,
}

type Rule = fn(&Attribution, &ReferenceTables) -> Option<Resolution>;

const RULES: [(&str, Rule); 3] = [
    ("author", by_author),
    ("law maxim", by_law_maxim),
    ("origin abbreviation", by_origin_abbreviation),
];

/// The attribution names a registered author.
fn by_author(attribution: &Attribution, tables: &ReferenceTables) -> Option<Resolution> {
    let author = attribution.expanded();
    let language = tables.author_language(&author)?;
    let source = tables.author_citation(&author).map(str::to_string);

    Some(Resolution {
        origin: language.to_string(),
        source_info: Some(source.unwrap_or(author)),
    })
}

/// Law maxims are cited as `_L._` or `_Law._` and are always Latin.
fn by_law_maxim(attribution: &Attribution, _tables: &ReferenceTables) -> Option<Resolution> {
    let first = attribution.first()?;
    if !LAW_TOKENS.contains(&first) {
        return None;
    }

    let mut tokens = vec![LAW_LABEL];
    tokens.extend(attribution.rest().iter().map(String::as_str));

    Some(Resolution {
        origin: FALLBACK_ORIGIN.to_string(),
        source_info: Some(join_expanded(&tokens)),
    })
}

/// The first token is a language abbreviation such as `Fr` or `Ger`.
fn by_origin_abbreviation(
    attribution: &Attribution,
    tables: &ReferenceTables,
) -> Option<Resolution> {
    let language = tables.origin_language(attribution.first()?)?;

    Some(Resolution {
        origin: language.to_string(),
        source_info: Some(join_expanded(attribution.rest())),
    })
}

/// Resolves the origin of a delimited-form entry.
pub fn resolve(
    attribution: Option<&Attribution>,
    has_translation: bool,
    tables: &ReferenceTables,
) -> Resolution {
    let attribution = attribution.filter(|a| !a.is_empty());

    if let Some(attribution) = attribution {
        for (name, rule) in RULES {
            if let Some(resolution) = rule(attribution, tables) {
                log::debug!("{name} rule resolved {:?}", attribution.tokens());
                return resolution;
            }
        }
    }

    let origin = if has_translation {
        FALLBACK_ORIGIN
    } else {
        UNKNOWN_ORIGIN
    };
    Resolution {
        origin: origin.to_string(),
        source_info: attribution.map(Attribution::expanded),
    }
}

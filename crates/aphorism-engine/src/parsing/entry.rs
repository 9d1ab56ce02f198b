use regex::Regex;
use std::sync::OnceLock;

use super::EntryError;
use super::abbreviation::join_expanded;
use super::attribution::Attribution;
use super::resolve::resolve;
use crate::models::ReferenceTables;

pub const GREEK_ORIGIN: &str = "Greek";
pub const EM_DASH_MARKER: &str = "--";

const GREEK_ATTRIBUTION: &str = "Gr";
const ORIGINAL_DELIMITER: char = '=';

fn greek_span() -> &'static Regex {
    static GREEK_SPAN: OnceLock<Regex> = OnceLock::new();
    GREEK_SPAN.get_or_init(|| Regex::new(r"\[Greek: (.*?)\]").expect("Invalid Greek span regex"))
}

fn clarification() -> &'static Regex {
    static CLARIFICATION: OnceLock<Regex> = OnceLock::new();
    CLARIFICATION
        .get_or_init(|| Regex::new(r", _i\.e\._.*$").expect("Invalid clarification regex"))
}

/// The four values recovered from one entry, before they are arranged into
/// a record. Empty strings mean "not present".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub original: String,
    pub translation: String,
    pub origin: String,
    pub source_info: Option<String>,
}

/// Recovers original text, translation and origin from an entry whose
/// attribution has already been split off.
pub fn parse_entry(
    text: &str,
    attribution: Option<&Attribution>,
    tables: &ReferenceTables,
) -> Result<EntryFields, EntryError> {
    let fields = match greek_span().captures(text).and_then(|caps| caps.get(1)) {
        Some(original) => parse_greek(text, original.as_str(), attribution)?,
        None => parse_delimited(text, attribution, tables)?,
    };

    if fields.original.is_empty() && fields.translation.is_empty() {
        return Err(EntryError::StructuralParseFailure {
            reason: "entry has no text besides its attribution".to_string(),
        });
    }
    Ok(fields)
}

/// Greek originals are not transcribed; the typesetter left a
/// `[Greek: ...]` placeholder followed directly by the translation.
fn parse_greek(
    text: &str,
    original: &str,
    attribution: Option<&Attribution>,
) -> Result<EntryFields, EntryError> {
    let remainder = text.replace(&format!("[Greek: {original}]"), "");
    let translation = strip_em_dash(&remainder)?.trim_end().to_string();

    let source_info = attribution.map(|attribution| {
        let tokens = match attribution.first() {
            Some(GREEK_ATTRIBUTION) => attribution.rest(),
            _ => attribution.tokens(),
        };
        join_expanded(tokens)
    });

    Ok(EntryFields {
        original: original.to_string(),
        translation,
        origin: GREEK_ORIGIN.to_string(),
        source_info,
    })
}

/// The original is wrapped in `=...=`. Asides and page breaks close the
/// wrapping and reopen it, so the original is every other non-empty
/// fragment, and the translation follows the final `=`.
fn parse_delimited(
    text: &str,
    attribution: Option<&Attribution>,
    tables: &ReferenceTables,
) -> Result<EntryFields, EntryError> {
    let fragments: Vec<&str> = text.split(ORIGINAL_DELIMITER).collect();

    let original = fragments
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .step_by(2)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let last = fragments.last().copied().unwrap_or_default();
    let translation = clarification().replace(last, "");
    let translation = translation.trim_end();
    let translation = if translation.is_empty() {
        translation
    } else {
        strip_em_dash(translation)?.trim()
    };

    let resolution = resolve(attribution, !translation.is_empty(), tables);

    Ok(EntryFields {
        original: original.trim().to_string(),
        translation: translation.to_string(),
        origin: resolution.origin,
        source_info: resolution.source_info,
    })
}

fn strip_em_dash(translation: &str) -> Result<&str, EntryError> {
    translation
        .strip_prefix(EM_DASH_MARKER)
        .ok_or_else(|| EntryError::FormatInvariantViolation {
            text: translation.to_string(),
        })
}

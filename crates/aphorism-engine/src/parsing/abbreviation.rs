//! Expansion of the anthology's short citation codes.
//!
//! Attributions such as `_Fr. Pr._` or `_L. M._` use a small set of
//! abbreviations for generic sources. Lookups against the reference tables
//! happen on the expanded form, so every key in the tables must be spelled
//! the way [`join_expanded`] produces it.

use regex::Regex;
use std::sync::OnceLock;

/// Separator used when attribution tokens are joined back into one label.
pub const TOKEN_SEPARATOR: &str = ". ";

const EXPANSIONS: [(&str, &str); 2] = [(r"\b(?:Prov|Pr)\b", "Proverb"), (r"\bM\b", "Maxim")];

fn expansions() -> &'static [(Regex, &'static str)] {
    static EXPANSION_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    EXPANSION_RULES.get_or_init(|| {
        EXPANSIONS
            .iter()
            .map(|(pattern, word)| {
                (
                    Regex::new(pattern).expect("Invalid abbreviation regex"),
                    *word,
                )
            })
            .collect()
    })
}

/// Replaces whole-word abbreviations by their full word.
pub fn expand(text: &str) -> String {
    let mut expanded = text.to_string();
    for (pattern, word) in expansions() {
        expanded = pattern.replace_all(&expanded, *word).into_owned();
    }
    expanded
}

/// Joins attribution tokens with [`TOKEN_SEPARATOR`] and expands them.
pub fn join_expanded<S: AsRef<str>>(tokens: &[S]) -> String {
    let joined = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(TOKEN_SEPARATOR);
    expand(&joined)
}

use regex::Regex;
use std::sync::OnceLock;

use super::abbreviation::join_expanded;
use crate::models::ReferenceTables;

/// Everything from the first match of one of these through the end of the
/// attribution is commentary ("_Johnson, to Boswell._", "_Said by Nelson._").
const TRUNCATION_TRIGGERS: [&str; 9] = [
    ",",
    "'",
    r"(?i)\bto\b",
    r"(?i)\bat\b",
    r"(?i)\bon\b",
    r"(?i)\bby\b",
    r"(?i)\bin\b",
    r"(?i)\bsaid\b",
    r"(?i)\bupon\b",
];

const ITALICS_MARKER: char = '_';

fn truncation_triggers() -> &'static [Regex] {
    static TRIGGERS: OnceLock<Vec<Regex>> = OnceLock::new();
    TRIGGERS.get_or_init(|| {
        TRUNCATION_TRIGGERS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("Invalid truncation trigger regex"))
            .collect()
    })
}

/// Cleaned source attribution of an entry, e.g. `["Fr", "Pr"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribution {
    tokens: Vec<String>,
}

impl Attribution {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Attribution without its first token.
    pub fn rest(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Tokens joined and abbreviation-expanded; the form used for lookups.
    pub fn expanded(&self) -> String {
        join_expanded(&self.tokens)
    }
}

/// Entry text with the attribution span cut out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub attribution: Option<Attribution>,
}

/// Finds the rightmost `_..._` span, together with anything trailing it.
///
/// Only the last span is considered; entries with several trailing spans
/// keep all but the last one in their text.
fn attribution_span(text: &str) -> Option<&str> {
    let closing = text.rfind(ITALICS_MARKER)?;
    let opening = text[..closing].rfind(ITALICS_MARKER)?;
    Some(&text[opening..])
}

/// Splits the trailing source attribution off a normalized entry.
pub fn extract_attribution(text: &str, tables: &ReferenceTables) -> Extraction {
    let Some(span) = attribution_span(text) else {
        return Extraction {
            text: text.trim_end().to_string(),
            attribution: None,
        };
    };

    let cleaned = text.replace(span, "").trim_end().to_string();
    let attribution = clean_attribution(span.trim_end(), tables);

    Extraction {
        text: cleaned,
        attribution: Some(attribution),
    }
}

fn clean_attribution(span: &str, tables: &ReferenceTables) -> Attribution {
    let mut span = span.to_string();
    for trigger in truncation_triggers() {
        if let Some(found) = trigger.find(&span) {
            span.truncate(found.start());
        }
    }

    let attribution = Attribution::new(
        span.replace(ITALICS_MARKER, "")
            .split('.')
            .map(str::trim)
            .filter(|token| !token.is_empty()),
    );

    match tables.canonical_author(&attribution.expanded()) {
        Some(author) => {
            log::debug!("attribution {:?} is an alias of {author}", attribution.tokens);
            Attribution::new([author])
        }
        None => attribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tables() -> ReferenceTables {
        ReferenceTables::default()
            .with_aliases("Shakespeare", &["Hamlet", "Jul. Caes"])
            .unwrap()
    }

    #[rstest]
    #[case("")]
    #[case("=Vera causa.=--True cause.")]
    #[case("A single _ marker")]
    fn test_no_span_leaves_text_unchanged(#[case] text: &str) {
        let extraction = extract_attribution(text, &tables());
        assert_eq!(extraction.text, text.trim_end());
        assert_eq!(extraction.attribution, None);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed_without_span() {
        let extraction = extract_attribution("=Amor vincit omnia.=  ", &tables());
        assert_eq!(extraction.text, "=Amor vincit omnia.=");
    }

    #[test]
    fn test_single_span_is_removed_and_tokenized() {
        let extraction = extract_attribution("=A bon chat, bon rat.=--To a good cat, a good rat. _Fr. Pr._", &tables());

        assert_eq!(extraction.text, "=A bon chat, bon rat.=--To a good cat, a good rat.");
        assert_eq!(extraction.attribution, Some(Attribution::new(["Fr", "Pr"])));
    }

    #[test]
    fn test_only_last_span_is_taken() {
        let extraction = extract_attribution("=_Caveat_ emptor.=--Let the buyer beware. _L._", &tables());

        assert_eq!(extraction.text, "=_Caveat_ emptor.=--Let the buyer beware.");
        assert_eq!(extraction.attribution, Some(Attribution::new(["L"])));
    }

    #[test]
    fn test_text_after_span_goes_with_it() {
        let extraction = extract_attribution("=Amicus Plato.=--Plato is my friend. _Cic._ (adapted)", &tables());

        assert_eq!(extraction.text, "=Amicus Plato.=--Plato is my friend.");
        assert_eq!(extraction.attribution, Some(Attribution::new(["Cic", "(adapted)"])));
    }

    #[rstest]
    #[case::comma("_Johnson, Rasselas._", &["Johnson"])]
    #[case::apostrophe("_Burns' Poems._", &["Burns"])]
    #[case::to("_Johnson to Boswell._", &["Johnson"])]
    #[case::capitalized("_Lord Nelson. Said before Trafalgar._", &["Lord Nelson"])]
    #[case::upper_case("_Hor. UPON Satire._", &["Hor"])]
    #[case::upon("_Goethe upon Art._", &["Goethe"])]
    #[case::by("_Motto by Lord Bacon._", &["Motto"])]
    #[case::inside_word_is_kept("_Tonson. Boston._", &["Tonson", "Boston"])]
    fn test_elaborations_are_truncated(#[case] span: &str, #[case] expected: &[&str]) {
        let extraction = extract_attribution(&format!("Some saying. {span}"), &tables());
        assert_eq!(extraction.attribution, Some(Attribution::new(expected.iter().copied())));
    }

    #[test]
    fn test_trigger_at_start_leaves_empty_attribution() {
        let extraction = extract_attribution("Some saying. _In the press._", &tables());

        assert_eq!(extraction.text, "Some saying.");
        assert_eq!(extraction.attribution, Some(Attribution::default()));
    }

    #[rstest]
    #[case("_Hamlet._")]
    #[case("_Jul. Caes._")]
    #[case("_Hamlet, act iii._")]
    fn test_alias_collapses_to_author(#[case] span: &str) {
        let extraction = extract_attribution(&format!("To be or not to be. {span}"), &tables());
        assert_eq!(extraction.attribution, Some(Attribution::new(["Shakespeare"])));
    }

    #[test]
    fn test_attribution_accessors() {
        let attribution = Attribution::new(["Fr", "Pr"]);

        assert_eq!(attribution.first(), Some("Fr"));
        assert_eq!(attribution.rest(), ["Pr".to_string()]);
        assert_eq!(attribution.expanded(), "Fr. Proverb");

        let empty = Attribution::default();
        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
        assert!(empty.rest().is_empty());
    }
}

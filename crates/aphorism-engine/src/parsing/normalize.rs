use regex::Regex;
use std::sync::OnceLock;

/// Ordered (pattern, replacement) cleanup rules. Each rule runs over the
/// output of the previous one.
const SUBSTITUTIONS: [(&str, &str); 7] = [
    // footnote and page markers
    (r"\d+", ""),
    (r"\(\?\)", ""),
    (r"\n", " "),
    (r" {2,}", " "),
    // adjacent empty italics markers
    (r"_ _", " "),
    // editorial gloss after the closing `=`, plus the character that ends it
    (r"= \(.*?\).", "="),
    (r"\(_lit\._ .*?\)", ""),
];

fn rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        SUBSTITUTIONS
            .iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("Invalid normalizer regex"),
                    *replacement,
                )
            })
            .collect()
    })
}

/// Flattens a raw block into one trimmed logical line, stripping the
/// typesetting artifacts the anthology is littered with.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    for (pattern, replacement) in rules() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

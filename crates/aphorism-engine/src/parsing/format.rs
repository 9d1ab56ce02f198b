use super::entry::EntryFields;
use crate::models::ParsedRecord;

/// Arranges parsed fields into a record.
///
/// In a record, "original" always means non-English text and "translation"
/// English text. An entry without a translation was English to begin with,
/// so the text parsed as its original moves into the translation slot.
pub fn format_output(fields: EntryFields) -> ParsedRecord {
    let EntryFields {
        original,
        translation,
        origin,
        source_info,
    } = fields;
    let source_info = source_info.filter(|source| !source.is_empty());

    if translation.is_empty() {
        ParsedRecord {
            origin,
            original: None,
            translation: non_empty(original),
            source_info,
        }
    } else {
        ParsedRecord {
            origin,
            original: non_empty(original),
            translation: Some(translation),
            source_info,
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

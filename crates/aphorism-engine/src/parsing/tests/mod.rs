//! End-to-end tests of [`parse_block`] against the bundled reference tables.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use crate::models::{ParsedRecord, ReferenceTables};
use crate::parsing::{EntryError, parse_block};

#[fixture]
fn tables() -> ReferenceTables {
    ReferenceTables::bundled().unwrap()
}

fn record(
    origin: &str,
    original: Option<&str>,
    translation: &str,
    source_info: Option<&str>,
) -> ParsedRecord {
    ParsedRecord {
        origin: origin.to_string(),
        original: original.map(str::to_string),
        translation: Some(translation.to_string()),
        source_info: source_info.map(str::to_string),
    }
}

#[rstest]
#[case::origin_abbreviation(
    "=A bon chat, bon rat.=--To a good cat, a good rat. _Fr. Pr._",
    record("French", Some("A bon chat, bon rat."), "To a good cat, a good rat.", Some("Proverb"))
)]
#[case::clarification_and_latin_default(
    "=Ab ovo\nusque ad mala.=--From the egg to the apples, _i.e._ from\nbeginning to end. _Hor._",
    record("Latin", Some("Ab ovo usque ad mala."), "From the egg to the apples", Some("Hor"))
)]
#[case::greek(
    "[Greek: Gnôthi seauton.]--Know thyself. _Gr._",
    record("Greek", Some("Gnôthi seauton."), "Know thyself.", None)
)]
#[case::english_author(
    "=Sir, I have found you an argument; but I am not obliged to find you an\nunderstanding.= _Johnson._",
    record(
        "English",
        None,
        "Sir, I have found you an argument; but I am not obliged to find you an understanding.",
        Some("Johnson"),
    )
)]
#[case::play_title_alias(
    "=The better part of valour is discretion.= _Hen. IV._",
    record("English", None, "The better part of valour is discretion.", Some("Shak."))
)]
#[case::law_maxim(
    "=Actus Dei nemini facit injuriam.=--The act of God does injury to no one. _L. M._",
    record("Latin", Some("Actus Dei nemini facit injuriam."), "The act of God does injury to no one.", Some("Law. Maxim"))
)]
#[case::aside_and_uncertain_attribution(
    "=Tempora mutantur,= [Borbonius] =et nos mutamur in illis.=--The times\nare changed, and we with them. _Lothair I.(?)_",
    record(
        "Latin",
        Some("Tempora mutantur, et nos mutamur in illis."),
        "The times are changed, and we with them.",
        Some("Lothair I"),
    )
)]
#[case::no_attribution(
    "=Festina lente.=--Hasten slowly.",
    record("Latin", Some("Festina lente."), "Hasten slowly.", None)
)]
#[case::english_without_attribution(
    "=Least said, soonest mended.=",
    record("UNK", None, "Least said, soonest mended.", None)
)]
#[case::incomplete_greek_placeholder(
    "=Nosce te ipsum [Greek:]=--Know thyself. _Pr._",
    record("Latin", Some("Nosce te ipsum [Greek:]"), "Know thyself.", Some("Proverb"))
)]
#[case::elaborated_attribution(
    "=L'état c'est moi.=--I am the State. _Louis XIV., to the Parliament of Paris._",
    record("Latin", Some("L'état c'est moi."), "I am the State.", Some("Louis XIV"))
)]
fn test_parse_block(
    tables: ReferenceTables,
    #[case] raw: &str,
    #[case] expected: ParsedRecord,
) {
    assert_eq!(parse_block(raw, &tables).unwrap(), expected);
}

#[rstest]
#[case::footnote_marker_before_translation(
    "=Qui s'excuse s'accuse.=[1]--He who excuses himself accuses himself. _Fr. Pr._"
)]
#[case::plain_prose("A saying with no markup at all.")]
#[case::greek_without_em_dash("[Greek: panta rhei] All things flow. _Heraclitus._")]
#[case::unterminated_greek_without_delimiters("[Greek: panta rhei--All things flow.")]
fn test_format_invariant_violations(tables: ReferenceTables, #[case] raw: &str) {
    let err = parse_block(raw, &tables).unwrap_err();
    assert_eq!(err.kind(), "FormatInvariantViolation");
}

#[rstest]
#[case::attribution_only("_Pr._")]
#[case::empty("")]
fn test_structural_failures(tables: ReferenceTables, #[case] raw: &str) {
    let err = parse_block(raw, &tables).unwrap_err();
    assert!(matches!(err, EntryError::StructuralParseFailure { .. }));
}

#[rstest]
fn test_every_record_has_text(tables: ReferenceTables) {
    let blocks = [
        "=Vera causa.=--True cause. _Pr._",
        "=Know thyself.= _Pr._",
        "[Greek: ...]--Nothing in excess. _Gr._",
    ];

    for raw in blocks {
        let record = parse_block(raw, &tables).unwrap();
        assert!(record.translation.is_some(), "no English text for {raw:?}");
        if record.original.is_some() {
            assert!(record.translation.is_some());
        }
    }
}

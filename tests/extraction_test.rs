use pedigree_scan::extraction::normalize::{NAME_NOISE_PREFIXES, NOISE_SYMBOLS, NOISE_WORDS};
use pedigree_scan::{parse_record, Gender, PedigreeRecord};

mod common;

#[test]
fn test_seed_certificate() {
    let parsed = parse_record(common::SEED_TEXT);
    let record = parsed.record;

    assert_eq!(record.name.as_deref(), Some("SORNRUK"));
    assert_eq!(record.breed.as_deref(), Some("Thai Ridgeback Dog"));
    assert_eq!(record.gender, Some(Gender::Female));
    assert_eq!(record.registration_number.as_deref(), Some("KCTH 2024-0091"));
    assert_eq!(record.owner_name.as_deref(), Some("Mr. Somchai"));
    assert_eq!(record.birth_date.as_deref(), Some("2007-07-15"));
    assert_eq!(record.sire_name, None);
    assert_eq!(record.dam_name, None);
}

#[test]
fn test_unrecognizable_text_gives_empty_record() {
    for text in ["", "   \n\n  ", "lorem ipsum dolor sit amet", "12 34 56\n???"] {
        let parsed = parse_record(text);
        assert_eq!(parsed.record, PedigreeRecord::default(), "text: {:?}", text);
        assert!(parsed.sources.is_empty());
    }
}

#[test]
fn test_parsing_is_deterministic() {
    let first = parse_record(common::SEED_TEXT);
    let second = parse_record(common::SEED_TEXT);
    assert_eq!(first, second);
}

#[test]
fn test_parents_resolve_to_different_lines() {
    let text = "SORNRUK
KCTH 2024-0091
Female
THONGDEE
KCTH 2019-0033 Red 3/12/2019
MALIWAN
KCTH 2020-0045 Blue 5/6/2020";

    let record = parse_record(text).record;
    assert_eq!(record.registration_number.as_deref(), Some("KCTH 2024-0091"));
    assert_eq!(record.sire_name.as_deref(), Some("THONGDEE"));
    assert_eq!(record.dam_name.as_deref(), Some("MALIWAN"));
    assert_ne!(record.sire_name, record.dam_name);
}

#[test]
fn test_trailing_noise_words_are_dropped() {
    for word in NOISE_WORDS {
        let text = format!("Sire: THONGDEE {}", word);
        let sire = parse_record(&text).record.sire_name;
        assert_eq!(sire.as_deref(), Some("THONGDEE"), "noise word {:?}", word);
    }
}

#[test]
fn test_noise_symbols_are_dropped() {
    for symbol in NOISE_SYMBOLS {
        let text = format!("Dam: {}MALIWAN {}", symbol, symbol);
        let dam = parse_record(&text).record.dam_name;
        assert_eq!(dam.as_deref(), Some("MALIWAN"), "noise symbol {:?}", symbol);
    }
}

#[test]
fn test_noise_prefixes_are_dropped_from_names() {
    for prefix in NAME_NOISE_PREFIXES {
        let text = format!("Sire: {} THONGDEE", prefix);
        let sire = parse_record(&text).record.sire_name;
        assert_eq!(sire.as_deref(), Some("THONGDEE"), "noise prefix {:?}", prefix);
    }
}

#[test]
fn test_month_name_dates_in_context() {
    let cases = [
        ("Born: JULY 15, 2007", "2007-07-15"),
        ("whelped dec 1.1999 in Bangkok", "1999-12-01"),
        ("Date of birth Sept. 3rd, 2021", "2021-09-03"),
    ];
    for (text, expected) in cases {
        let record = parse_record(text).record;
        assert_eq!(record.birth_date.as_deref(), Some(expected), "text: {:?}", text);
    }
}

#[test]
fn test_registry_line_never_becomes_dam() {
    let text = "SORNRUK
KCTH 2024-0091
THONGDEE
KCTH 2019-0033
MALIWAN
KCTH 2020-0045
Red 3/12/2019";

    let record = parse_record(text).record;
    assert_eq!(record.sire_name.as_deref(), Some("THONGDEE"));
    assert_eq!(record.dam_name, None);
}

#[test]
fn test_compound_name_labels_go_to_their_own_fields() {
    let record = parse_record("Sire Name: THONGDEE\nDam Name: MALIWAN\nSORNRUK").record;
    assert_eq!(record.name.as_deref(), Some("SORNRUK"));
    assert_eq!(record.sire_name.as_deref(), Some("THONGDEE"));
    assert_eq!(record.dam_name.as_deref(), Some("MALIWAN"));

    let record = parse_record("Owner Name: Mr. Somchai\nSORNRUK").record;
    assert_eq!(record.name.as_deref(), Some("SORNRUK"));
    assert_eq!(record.owner_name.as_deref(), Some("Mr. Somchai"));
}

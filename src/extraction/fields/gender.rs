use crate::extraction::strategy::{keep, Document, Field, FieldExtractor, Resolved, Strategy};
use once_cell::sync::Lazy;
use regex::Regex;

/// `bitch` is the registry term for a female
static FEMALE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:female|bitch)\b").unwrap());

static MALE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmale\b").unwrap());

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::Gender,
    strategies: &[
        Strategy {
            priority: 1,
            name: "female_keyword",
            extract: female_keyword,
            accept: is_gender,
        },
        Strategy {
            priority: 2,
            name: "male_keyword",
            extract: male_keyword,
            accept: is_gender,
        },
    ],
    finish: keep,
};

fn is_gender(value: &str) -> bool {
    matches!(value, "female" | "male")
}

fn female_keyword(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    FEMALE_RE.is_match(doc.raw()).then(|| "female".to_string())
}

fn male_keyword(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    MALE_RE.is_match(doc.raw()).then(|| "male".to_string())
}

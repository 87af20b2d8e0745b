use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{label_value, FIELD_LABEL_RE};
use crate::extraction::strategy::{
    plausible_text, Document, Field, FieldExtractor, Resolved, Strategy,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker word (lowercase) to canonical breed name.
pub const BREED_KEYWORDS: &[(&str, &str)] = &[
    ("ridgeback", "Thai Ridgeback Dog"),
    ("bangkaew", "Thai Bangkaew Dog"),
    ("bang kaew", "Thai Bangkaew Dog"),
];

/// `Bo` is how the recognizer often reads `Breed`; it only counts as a label
/// when a separator follows.
static BREED_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Breed|BREED)\b|\bBo\b[ \t]*[:.]").unwrap());

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::Breed,
    strategies: &[
        Strategy {
            priority: 1,
            name: "breed_label",
            extract: by_label,
            accept: plausible_breed,
        },
        Strategy {
            priority: 2,
            name: "breed_keyword",
            extract: by_keyword,
            accept: plausible_breed,
        },
    ],
    finish: clean_candidate,
};

fn plausible_breed(value: &str) -> bool {
    plausible_text(value, 60)
}

pub fn canonical_breed(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    BREED_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, canonical)| *canonical)
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    let value = label_value(doc.raw(), &BREED_LABEL_RE, &[&FIELD_LABEL_RE])?;
    Some(canonical_breed(value).unwrap_or(value).to_string())
}

fn by_keyword(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    canonical_breed(doc.raw()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<(String, &'static str)> {
        EXTRACTOR
            .extract(&Document::new(text), &Resolved::default())
            .map(|c| (c.value, c.strategy))
    }

    #[test]
    fn test_label_value_is_canonicalized() {
        let found = extract("Breed: Thai Ridgeback\nFemale");
        assert_eq!(found, Some(("Thai Ridgeback Dog".to_string(), "breed_label")));
    }

    #[test]
    fn test_unknown_breed_kept_verbatim() {
        let found = extract("BREED: Siberian Husky  Sex: Male");
        assert_eq!(found, Some(("Siberian Husky".to_string(), "breed_label")));
    }

    #[test]
    fn test_bo_misreading_needs_separator() {
        let found = extract("Bo: Thai Bangkaew");
        assert_eq!(found, Some(("Thai Bangkaew Dog".to_string(), "breed_label")));
        assert_eq!(extract("Bo THONGDEE"), None);
    }

    #[test]
    fn test_keyword_fallback() {
        let found = extract("THAI RIDGEBACK DOG ASSOCIATION\nSORNRUK");
        assert_eq!(found, Some(("Thai Ridgeback Dog".to_string(), "breed_keyword")));
    }
}

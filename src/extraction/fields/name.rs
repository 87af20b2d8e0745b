use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{
    contains_registry_marker, is_field_label, label_value_where, preceding_word, FIELD_LABEL_RE,
    LABEL_WORDS,
};
use crate::extraction::strategy::{
    plausible_text, Document, Field, FieldExtractor, Resolved, Strategy,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// How many lines from the top the fallback looks at
const LEADING_LINES: usize = 5;

static NAME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Name|NAME|Narne|NARNE|Nane|NANE|Nama)\b").unwrap());

static SEX_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:MALE|FEMALE|Male|Female)\b").unwrap());

static UPPERCASE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3,}").unwrap());

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:pedigree|certificate|kennel|club|association)\b").unwrap()
});

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::Name,
    strategies: &[
        Strategy {
            priority: 1,
            name: "name_label",
            extract: by_label,
            accept: plausible_name,
        },
        Strategy {
            priority: 2,
            name: "leading_uppercase_line",
            extract: leading_uppercase_line,
            accept: plausible_name,
        },
    ],
    finish: clean_candidate,
};

fn plausible_name(value: &str) -> bool {
    plausible_text(value, 60)
}

/// `Name` on its own; "Sire Name", "Owner Name" and the like belong to
/// other fields.
fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    let raw = doc.raw();
    label_value_where(raw, &NAME_LABEL_RE, &[&FIELD_LABEL_RE, &SEX_WORD_RE], |found| {
        preceding_word(raw, found.start())
            .map(|word| !LABEL_WORDS.contains(&word.to_lowercase().as_str()))
            .unwrap_or(true)
    })
    .map(str::to_string)
}

/// First of the top lines with a run of capitals, letters only.
fn leading_uppercase_line(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    doc.lines()
        .iter()
        .take(LEADING_LINES)
        .filter(|line| {
            !contains_registry_marker(line) && !HEADER_RE.is_match(line) && !is_field_label(line)
        })
        .find(|line| UPPERCASE_RUN_RE.is_match(line))
        .map(|line| {
            line.chars()
                .map(|c| if c.is_alphabetic() { c } else { ' ' })
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
}

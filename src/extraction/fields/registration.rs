use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{label_value, FIELD_LABEL_RE, REGISTRY_CODE_RE};
use crate::extraction::strategy::{Document, Field, FieldExtractor, Resolved, Strategy};
use once_cell::sync::Lazy;
use regex::Regex;

static REG_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Reg(?:istration)?|REG(?:ISTRATION)?)\.?[ \t]*(?:No|NO|Number|NUMBER)\b")
        .unwrap()
});

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::RegistrationNumber,
    strategies: &[
        Strategy {
            priority: 1,
            name: "registry_code",
            extract: by_registry_code,
            accept: plausible_number,
        },
        Strategy {
            priority: 2,
            name: "reg_no_label",
            extract: by_label,
            accept: plausible_number,
        },
    ],
    finish: clean_candidate,
};

fn plausible_number(value: &str) -> bool {
    let len = value.chars().count();
    (3..=30).contains(&len) && value.chars().any(|c| c.is_ascii_digit())
}

fn by_registry_code(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    REGISTRY_CODE_RE
        .find(doc.raw())
        .map(|found| found.as_str().to_string())
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    label_value(doc.raw(), &REG_LABEL_RE, &[&FIELD_LABEL_RE]).map(str::to_string)
}

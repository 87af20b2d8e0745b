use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::label_value;
use crate::extraction::strategy::{
    plausible_text, Document, Field, FieldExtractor, Resolved, Strategy,
};
use once_cell::sync::Lazy;
use regex::Regex;

static OWNER_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Owner|OWNER)(?:[ \t]+(?:Name|NAME))?\b").unwrap());

/// A phone or member number left at the end of the owner line
static TRAILING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+[0-9][0-9 \-]*$").unwrap());

static HONORIFIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mrs|Mr|Miss|Ms)\.?[ \t]+[A-Za-z]+(?:[ \t]+[A-Z][A-Za-z]+)?").unwrap()
});

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::OwnerName,
    strategies: &[
        Strategy {
            priority: 1,
            name: "owner_label",
            extract: by_label,
            accept: plausible_owner,
        },
        Strategy {
            priority: 2,
            name: "honorific",
            extract: by_honorific,
            accept: plausible_owner,
        },
    ],
    finish: clean_candidate,
};

fn plausible_owner(value: &str) -> bool {
    plausible_text(value, 80)
}

/// Rest of the owner line; other labels do not bound it.
fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    let value = label_value(doc.raw(), &OWNER_LABEL_RE, &[])?;
    Some(TRAILING_NUMBER_RE.replace(value, "").into_owned())
}

fn by_honorific(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    HONORIFIC_RE
        .find(doc.raw())
        .map(|found| found.as_str().to_string())
}

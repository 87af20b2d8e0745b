use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{
    is_field_label, label_value, normalize_code, FIELD_LABEL_RE, REGISTRY_CODE_RE,
};
use crate::extraction::strategy::{
    plausible_text, Document, Field, FieldExtractor, Resolved, Strategy,
};
use once_cell::sync::Lazy;
use regex::Regex;

static SIRE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Sire|SIRE)(?:[ \t]+(?:Name|NAME))?\b").unwrap());

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::SireName,
    strategies: &[
        Strategy {
            priority: 1,
            name: "sire_label",
            extract: by_label,
            accept: plausible_parent,
        },
        Strategy {
            priority: 2,
            name: "line_above_registry_code",
            extract: line_above_registry_code,
            accept: plausible_parent,
        },
    ],
    finish: clean_candidate,
};

pub(crate) fn plausible_parent(value: &str) -> bool {
    plausible_text(value, 60) && !is_field_label(value)
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    label_value(doc.raw(), &SIRE_LABEL_RE, &[&FIELD_LABEL_RE]).map(str::to_string)
}

/// Parents are listed as a name line followed by their own registry code.
/// The first registry line that is not the dog's own number belongs to the
/// sire.
fn line_above_registry_code(doc: &Document<'_>, resolved: &Resolved<'_>) -> Option<String> {
    let own_number = resolved.registration_number.map(normalize_code);
    let lines = doc.lines();

    lines.iter().enumerate().skip(1).find_map(|(idx, line)| {
        let code = REGISTRY_CODE_RE.find(line)?;
        if own_number.as_deref() == Some(normalize_code(code.as_str()).as_str()) {
            return None;
        }
        let above = lines[idx - 1];
        if is_field_label(above) || REGISTRY_CODE_RE.is_match(above) {
            return None;
        }
        Some(above.to_string())
    })
}

use super::sire::plausible_parent;
use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{
    find_color, is_field_label, label_value, FIELD_LABEL_RE, REGISTRY_CODE_RE,
};
use crate::extraction::strategy::{Document, Field, FieldExtractor, Resolved, Strategy};
use once_cell::sync::Lazy;
use regex::Regex;

static DAM_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Dam|DAM)(?:[ \t]+(?:Name|NAME))?\b").unwrap());

/// `d/d/yyyy` with `/`, `.` or `-` separators
static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{1,2}[ \t]*[/.\-][ \t]*[0-9]{1,2}[ \t]*[/.\-][ \t]*[0-9]{4}\b").unwrap()
});

/// The structural pass runs before the label: on the certificates this was
/// tuned on, the `Dam` label sits in a column the recognizer rarely keeps on
/// the same line as the name.
pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::DamName,
    strategies: &[
        Strategy {
            priority: 1,
            name: "line_above_dated_color",
            extract: line_above_dated_color,
            accept: plausible_parent,
        },
        Strategy {
            priority: 2,
            name: "dam_label",
            extract: by_label,
            accept: plausible_parent,
        },
    ],
    finish: clean_candidate,
};

/// Name line directly above a line carrying both a numeric date and a coat
/// color, skipping the one already taken by the sire.
///
/// Only validated against one certificate layout family.
fn line_above_dated_color(doc: &Document<'_>, resolved: &Resolved<'_>) -> Option<String> {
    let sire = resolved.sire_name.map(str::to_lowercase);
    let lines = doc.lines();

    lines.iter().enumerate().skip(1).find_map(|(idx, line)| {
        if !NUMERIC_DATE_RE.is_match(line) || find_color(line).is_none() {
            return None;
        }
        let above = lines[idx - 1];
        if is_field_label(above) || REGISTRY_CODE_RE.is_match(above) {
            return None;
        }
        if sire.as_deref() == Some(clean_candidate(above).to_lowercase().as_str()) {
            return None;
        }
        Some(above.to_string())
    })
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    label_value(doc.raw(), &DAM_LABEL_RE, &[&FIELD_LABEL_RE]).map(str::to_string)
}

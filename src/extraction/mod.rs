//! Turns recognized certificate text into a [`PedigreeRecord`].
//!
//! Each field has its own ordered strategy table (see [`fields`]). Fields are
//! extracted one after another against the raw text; the only dependencies
//! between them are explicit: the sire's line scan needs the registration
//! number, the dam's needs the sire.

pub mod fields;
pub mod normalize;
pub mod patterns;
pub mod record;
pub mod strategy;

pub use record::{FieldSource, Gender, PedigreeRecord};
pub use strategy::{Document, ExtractionCandidate, Field, FieldExtractor, Resolved, Strategy};

use serde::Serialize;

/// A record plus the strategy behind every resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    pub record: PedigreeRecord,
    pub sources: Vec<FieldSource>,
}

/// Run every field extractor over the recognized text.
pub fn parse_record(raw: &str) -> ParsedRecord {
    let doc = Document::new(raw);
    let base = Resolved::default();

    let name = fields::name::EXTRACTOR.extract(&doc, &base);
    let breed = fields::breed::EXTRACTOR.extract(&doc, &base);
    let gender = fields::gender::EXTRACTOR.extract(&doc, &base);
    let color = fields::color::EXTRACTOR.extract(&doc, &base);
    let registration_number = fields::registration::EXTRACTOR.extract(&doc, &base);
    let birth_date = fields::birth_date::EXTRACTOR.extract(&doc, &base);
    let owner_name = fields::owner::EXTRACTOR.extract(&doc, &base);

    let with_registration = Resolved {
        registration_number: value_of(&registration_number),
        ..base
    };
    let sire_name = fields::sire::EXTRACTOR.extract(&doc, &with_registration);

    let with_sire = Resolved {
        sire_name: value_of(&sire_name),
        ..with_registration
    };
    let dam_name = fields::dam::EXTRACTOR.extract(&doc, &with_sire);

    let (sire_name, dam_name) = disambiguate_parents(sire_name, dam_name);

    let sources = [
        (Field::Name, &name),
        (Field::Breed, &breed),
        (Field::Gender, &gender),
        (Field::Color, &color),
        (Field::RegistrationNumber, &registration_number),
        (Field::BirthDate, &birth_date),
        (Field::SireName, &sire_name),
        (Field::DamName, &dam_name),
        (Field::OwnerName, &owner_name),
    ]
    .into_iter()
    .filter_map(|(field, candidate)| {
        candidate.as_ref().map(|found| FieldSource {
            field,
            strategy: found.strategy,
        })
    })
    .collect();

    let record = PedigreeRecord {
        name: into_value(name),
        breed: into_value(breed),
        gender: gender.and_then(|found| found.value.parse().ok()),
        color: into_value(color),
        registration_number: into_value(registration_number),
        birth_date: into_value(birth_date),
        sire_name: into_value(sire_name),
        dam_name: into_value(dam_name),
        owner_name: into_value(owner_name),
    };

    ParsedRecord { record, sources }
}

/// Identical sire and dam means the layout heuristics failed to tell the
/// parents apart; keep the value once, as the sire.
fn disambiguate_parents(
    sire: Option<ExtractionCandidate>,
    dam: Option<ExtractionCandidate>,
) -> (Option<ExtractionCandidate>, Option<ExtractionCandidate>) {
    match (sire, dam) {
        (Some(sire), Some(dam)) if sire.value.eq_ignore_ascii_case(&dam.value) => {
            tracing::warn!(value = %sire.value, "sire and dam resolved to the same name, dropping dam");
            (Some(sire), None)
        }
        pair => pair,
    }
}

fn value_of(candidate: &Option<ExtractionCandidate>) -> Option<&str> {
    candidate.as_ref().map(|found| found.value.as_str())
}

fn into_value(candidate: Option<ExtractionCandidate>) -> Option<String> {
    candidate.map(|found| found.value)
}

//! Values a registration form starts from
//!
//! Every field is plain editable text; nothing extracted is trusted without a
//! human seeing it. Absent values fall back to safe defaults.

use crate::extraction::{Gender, PedigreeRecord};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPrefill {
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub color: String,
    pub registration_number: String,
    pub birth_date: String,
    pub sire_name: String,
    pub dam_name: String,
    pub owner_name: String,
}

impl FormPrefill {
    /// Gender defaults to male and the birth date to `today`.
    pub fn from_record(record: &PedigreeRecord, today: NaiveDate) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            name: text(&record.name),
            breed: text(&record.breed),
            gender: record.gender.unwrap_or_default(),
            color: text(&record.color),
            registration_number: text(&record.registration_number),
            birth_date: record
                .birth_date
                .clone()
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            sire_name: text(&record.sire_name),
            dam_name: text(&record.dam_name),
            owner_name: text(&record.owner_name),
        }
    }

    pub fn empty(today: NaiveDate) -> Self {
        Self::from_record(&PedigreeRecord::default(), today)
    }
}

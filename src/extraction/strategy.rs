//! Ordered extraction strategies
//!
//! Every field owns a static table of strategies. They are tried by ascending
//! priority and the first one whose cleaned candidate passes its predicate
//! wins; lower-priority strategies are never consulted after that, and
//! candidates from different strategies are never merged.

use serde::Serialize;
use std::fmt;

/// Recognized text split into trimmed, non-blank lines.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    raw: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    pub fn new(raw: &'a str) -> Self {
        let lines = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self { raw, lines }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

/// Values of fields already extracted that later strategies depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved<'r> {
    pub registration_number: Option<&'r str>,
    pub sire_name: Option<&'r str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Breed,
    Gender,
    Color,
    RegistrationNumber,
    BirthDate,
    SireName,
    DamName,
    OwnerName,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Breed => "breed",
            Self::Gender => "gender",
            Self::Color => "color",
            Self::RegistrationNumber => "registration_number",
            Self::BirthDate => "birth_date",
            Self::SireName => "sire_name",
            Self::DamName => "dam_name",
            Self::OwnerName => "owner_name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ExtractFn = fn(&Document<'_>, &Resolved<'_>) -> Option<String>;

/// One heuristic for one field.
#[derive(Clone, Copy)]
pub struct Strategy {
    /// Lower runs first
    pub priority: u8,
    pub name: &'static str,
    pub extract: ExtractFn,
    /// Validates the cleaned candidate (length, character class, ...)
    pub accept: fn(&str) -> bool,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("priority", &self.priority)
            .field("name", &self.name)
            .finish()
    }
}

/// A field value together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub value: String,
    pub strategy: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    pub field: Field,
    pub strategies: &'static [Strategy],
    /// Cleaning pass applied to every raw candidate
    pub finish: fn(&str) -> String,
}

impl FieldExtractor {
    pub fn extract(
        &self,
        doc: &Document<'_>,
        resolved: &Resolved<'_>,
    ) -> Option<ExtractionCandidate> {
        let mut ordered: Vec<&Strategy> = self.strategies.iter().collect();
        ordered.sort_by_key(|strategy| strategy.priority);

        let candidate = ordered.into_iter().find_map(|strategy| {
            let raw = (strategy.extract)(doc, resolved)?;
            let value = (self.finish)(&raw);
            if value.is_empty() || !(strategy.accept)(&value) {
                tracing::trace!(
                    field = %self.field,
                    strategy = strategy.name,
                    rejected = %value,
                    "candidate rejected"
                );
                return None;
            }
            Some(ExtractionCandidate {
                value,
                strategy: strategy.name,
            })
        });

        match &candidate {
            Some(found) => tracing::debug!(
                field = %self.field,
                strategy = found.strategy,
                value = %found.value,
                "field resolved"
            ),
            None => tracing::debug!(field = %self.field, "no strategy matched"),
        }

        candidate
    }
}

/// Cleaning pass for values that are already canonical.
pub fn keep(value: &str) -> String {
    value.trim().to_string()
}

/// 2..=`max` characters with at least one letter.
pub fn plausible_text(value: &str, max: usize) -> bool {
    let len = value.chars().count();
    (2..=max).contains(&len) && value.chars().any(char::is_alphabetic)
}

use super::strategy::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("not a gender: {}", other)),
        }
    }
}

/// Structured result of one certificate scan. Every field is optional; a
/// missing field means no strategy matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedigreeRecord {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub color: Option<String>,
    pub registration_number: Option<String>,
    /// Always `yyyy-mm-dd`
    pub birth_date: Option<String>,
    pub sire_name: Option<String>,
    pub dam_name: Option<String>,
    pub owner_name: Option<String>,
}

impl PedigreeRecord {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn resolved_count(&self) -> usize {
        [
            self.name.is_some(),
            self.breed.is_some(),
            self.gender.is_some(),
            self.color.is_some(),
            self.registration_number.is_some(),
            self.birth_date.is_some(),
            self.sire_name.is_some(),
            self.dam_name.is_some(),
            self.owner_name.is_some(),
        ]
        .into_iter()
        .filter(|resolved| *resolved)
        .count()
    }
}

/// Which strategy produced a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSource {
    pub field: Field,
    pub strategy: &'static str,
}

//! One module per record field, each exporting an `EXTRACTOR` table.

pub mod birth_date;
pub mod breed;
pub mod color;
pub mod dam;
pub mod gender;
pub mod name;
pub mod owner;
pub mod registration;
pub mod sire;

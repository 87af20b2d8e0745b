//! The three fixed preprocessing steps, each `DynamicImage -> DynamicImage`

pub mod grayscale;
pub mod resize;
pub mod threshold;

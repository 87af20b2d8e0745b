use crate::extraction::normalize::clean_candidate;
use crate::extraction::patterns::{find_color, label_value, FIELD_LABEL_RE};
use crate::extraction::strategy::{
    plausible_text, Document, Field, FieldExtractor, Resolved, Strategy,
};
use once_cell::sync::Lazy;
use regex::Regex;

static COLOR_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Colou?r|COLOU?R)\b").unwrap());

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::Color,
    strategies: &[
        Strategy {
            priority: 1,
            name: "color_label",
            extract: by_label,
            accept: plausible_color,
        },
        Strategy {
            priority: 2,
            name: "color_name",
            extract: by_name,
            accept: plausible_color,
        },
    ],
    finish: clean_candidate,
};

fn plausible_color(value: &str) -> bool {
    plausible_text(value, 40)
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    label_value(doc.raw(), &COLOR_LABEL_RE, &[&FIELD_LABEL_RE]).map(str::to_string)
}

fn by_name(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    find_color(doc.raw()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<(String, &'static str)> {
        EXTRACTOR
            .extract(&Document::new(text), &Resolved::default())
            .map(|c| (c.value, c.strategy))
    }

    #[test]
    fn test_colour_label_bounded_by_next_label() {
        let found = extract("Colour: Light Fawn Sex: Female");
        assert_eq!(found, Some(("Light Fawn".to_string(), "color_label")));
    }

    #[test]
    fn test_canonical_name_anywhere() {
        let found = extract("SORNRUK\nBLUE\nFemale");
        assert_eq!(found, Some(("Blue".to_string(), "color_name")));
    }

    #[test]
    fn test_no_color() {
        assert_eq!(extract("Breed: Thai Ridgeback"), None);
    }
}

//! Patterns shared between field extractors: field labels, registry codes,
//! coat colors and month names.

use once_cell::sync::Lazy;
use regex::Regex;

/// Registry prefixes that start an official registration number.
pub const REGISTRY_PREFIXES: &[&str] = &["KCTH"];

/// Words that open a labelled field on a certificate (lowercase).
pub const LABEL_WORDS: &[&str] = &[
    "name",
    "breed",
    "sex",
    "gender",
    "color",
    "colour",
    "reg",
    "registration",
    "date",
    "born",
    "whelped",
    "sire",
    "dam",
    "owner",
    "breeder",
    "microchip",
];

/// Canonical coat colors, most specific first.
pub const COLOR_NAMES: &[&str] = &[
    "Light Fawn",
    "Red",
    "Black",
    "Blue",
    "Fawn",
    "Isabella",
    "Brindle",
    "Silver",
    "Chocolate",
    "Cream",
    "White",
];

/// Month-name prefix to two-digit month number.
pub const MONTHS: &[(&str, &str)] = &[
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// Any field label, in the spellings the recognizer produces for them.
pub static FIELD_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?:Name|NAME|Narne|NARNE|Nane|Breed|BREED|Sex|SEX|Gender|GENDER",
        r"|Colou?r|COLOU?R|Reg(?:istration)?\.?[ \t]*No|REG(?:ISTRATION)?\.?[ \t]*NO",
        r"|Date|DATE|Born|BORN|Whelped|WHELPED|Sire|SIRE|Dam|DAM",
        r"|Owner|OWNER|Breeder|BREEDER|Microchip|MICROCHIP)\b"
    ))
    .unwrap()
});

/// A registry prefix followed by a code containing at least one digit.
pub static REGISTRY_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:{})[ \t]*[A-Z]*[0-9][A-Z0-9/\-]*",
        REGISTRY_PREFIXES.join("|")
    ))
    .unwrap()
});

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = COLOR_NAMES
        .iter()
        .map(|color| color.to_lowercase().replace(' ', r"[ \t]+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives)).unwrap()
});

/// Value following the first occurrence of `label` that has one.
///
/// The value never crosses a line break and ends at the earliest match of any
/// of `stops`. Separator punctuation around the value is trimmed.
pub fn label_value<'a>(text: &'a str, label: &Regex, stops: &[&Regex]) -> Option<&'a str> {
    label_value_where(text, label, stops, |_| true)
}

/// [`label_value`] over the label occurrences for which `keep` holds.
pub fn label_value_where<'a>(
    text: &'a str,
    label: &Regex,
    stops: &[&Regex],
    keep: impl Fn(regex::Match<'a>) -> bool,
) -> Option<&'a str> {
    label.find_iter(text).filter(|found| keep(*found)).find_map(|found| {
        let rest = &text[found.end()..];
        let line = rest.split('\n').next().unwrap_or_default();
        let end = stops
            .iter()
            .filter_map(|stop| stop.find(line).map(|m| m.start()))
            .min()
            .unwrap_or(line.len());
        let value = line[..end]
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '.' | '-' | '='));
        (!value.is_empty()).then_some(value)
    })
}

/// Word directly before byte offset `at`, on the same line.
pub fn preceding_word(text: &str, at: usize) -> Option<&str> {
    let before = &text[..at];
    let line = before.rsplit('\n').next().unwrap_or_default();
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .last()
}

/// True when the text starts with a field label word.
pub fn is_field_label(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .find(|word| !word.is_empty())
        .map(|word| LABEL_WORDS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn contains_registry_marker(text: &str) -> bool {
    REGISTRY_PREFIXES.iter().any(|prefix| text.contains(prefix))
}

/// Registration codes compared without spacing or case differences.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First canonical color name found anywhere in the text.
pub fn find_color(text: &str) -> Option<&'static str> {
    let found = COLOR_RE.find(text)?;
    let key = found
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    COLOR_NAMES
        .iter()
        .copied()
        .find(|color| color.to_lowercase() == key)
}

/// Two-digit month for a full or abbreviated English month name.
pub fn month_number(name: &str) -> Option<&'static str> {
    let key = name.trim_end_matches('.').to_lowercase();
    let prefix = key.get(..3)?;
    MONTHS
        .iter()
        .find(|(month, _)| *month == prefix)
        .map(|(_, number)| *number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_value_stops_at_next_label() {
        let label = Regex::new(r"\bColou?r\b").unwrap();
        let text = "Colour: Red  Sex: Female\nOwner: Mr. Somchai";
        assert_eq!(label_value(text, &label, &[&FIELD_LABEL_RE]), Some("Red"));
    }

    #[test]
    fn test_label_value_never_crosses_line() {
        let label = Regex::new(r"\bSire\b").unwrap();
        assert_eq!(label_value("Sire:\nTHONGDEE", &label, &[&FIELD_LABEL_RE]), None);
    }

    #[test]
    fn test_label_value_skips_empty_occurrences() {
        let label = Regex::new(r"\bSire\b").unwrap();
        let text = "Sire\nSire: THONGDEE";
        assert_eq!(label_value(text, &label, &[]), Some("THONGDEE"));
    }

    #[test]
    fn test_label_value_where_skips_rejected_occurrences() {
        let label = Regex::new(r"\bName\b").unwrap();
        let text = "Sire Name: THONGDEE\nName: SORNRUK";
        let found = label_value_where(text, &label, &[], |m| {
            preceding_word(text, m.start()) != Some("Sire")
        });
        assert_eq!(found, Some("SORNRUK"));
    }

    #[test]
    fn test_preceding_word_stays_on_line() {
        let text = "Owner\nName: X";
        assert_eq!(preceding_word(text, 6), None);
        assert_eq!(preceding_word("Dam Name", 4), Some("Dam"));
    }

    #[test]
    fn test_field_label_detection() {
        assert!(is_field_label("Sire"));
        assert!(is_field_label("DAM: MALIWAN"));
        assert!(is_field_label("  colour"));
        assert!(!is_field_label("THONGDEE"));
        assert!(!is_field_label("Damrong"));
        assert!(!is_field_label(""));
    }

    #[test]
    fn test_registry_code_requires_digit() {
        assert_eq!(
            REGISTRY_CODE_RE.find("No. KCTH 2024-0091 issued").map(|m| m.as_str()),
            Some("KCTH 2024-0091")
        );
        assert_eq!(
            REGISTRY_CODE_RE.find("KCTH19-552").map(|m| m.as_str()),
            Some("KCTH19-552")
        );
        assert!(REGISTRY_CODE_RE.find("KCTH Kennel Club").is_none());
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("kcth 2024-0091"), normalize_code("KCTH2024-0091"));
    }

    #[test]
    fn test_find_color_prefers_specific_names() {
        assert_eq!(find_color("coat LIGHT  FAWN markings"), Some("Light Fawn"));
        assert_eq!(find_color("blue 3/12/2019"), Some("Blue"));
        assert_eq!(find_color("Registered Breeder"), None);
    }

    #[test]
    fn test_month_number_accepts_full_and_short_names() {
        assert_eq!(month_number("JULY"), Some("07"));
        assert_eq!(month_number("Sept"), Some("09"));
        assert_eq!(month_number("dec."), Some("12"));
        assert_eq!(month_number("ju"), None);
    }
}

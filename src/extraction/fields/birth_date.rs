use crate::extraction::patterns::{label_value, month_number, FIELD_LABEL_RE};
use crate::extraction::strategy::{keep, Document, Field, FieldExtractor, Resolved, Strategy};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Month name (full or abbreviated), day, four-digit year
static MONTH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?",
        r"|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)",
        r"\.?[ \t]*([0-9]{1,2})(?:st|nd|rd|th)?[ \t]*[,.]?[ \t]*([0-9]{4})\b"
    ))
    .unwrap()
});

static DATE_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?:Date(?:[ \t]+of[ \t]+Birth)?|DATE(?:[ \t]+OF[ \t]+BIRTH)?",
        r"|Born|BORN|Whelped|WHELPED)\b"
    ))
    .unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").unwrap());

/// Free text up to and including the last plausible year
static THROUGH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*\b(?:19|20)[0-9]{2}\b").unwrap());

static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([0-9]{1,2})(?:st|nd|rd|th)\b").unwrap());

/// Formats tried by the generic fallback, day-first before month-first.
const GENERIC_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d %Y",
];

pub const EXTRACTOR: FieldExtractor = FieldExtractor {
    field: Field::BirthDate,
    strategies: &[
        Strategy {
            priority: 1,
            name: "month_name_date",
            extract: by_month_name,
            accept: is_iso_date,
        },
        Strategy {
            priority: 2,
            name: "date_label",
            extract: by_label,
            accept: is_iso_date,
        },
    ],
    finish: keep,
};

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() && value.len() == 10
}

/// Assembles `yyyy-mm-dd` straight from the matched parts. No calendar type
/// is involved in building the string, so there is nothing to shift it across
/// a timezone boundary; chrono only confirms the day exists.
fn by_month_name(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    MONTH_DATE_RE.captures_iter(doc.raw()).find_map(|caps| {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month.parse().ok()?, day)?;
        Some(format!("{:04}-{}-{:02}", year, month, day))
    })
}

fn by_label(doc: &Document<'_>, _: &Resolved<'_>) -> Option<String> {
    let value = label_value(doc.raw(), &DATE_LABEL_RE, &[&FIELD_LABEL_RE])?;
    if !YEAR_RE.is_match(value) {
        return None;
    }

    // Whole value, then trailing words dropped, then the first word alone
    let through_year = THROUGH_YEAR_RE.find(value).map(|found| found.as_str());
    let first_word = value.split_whitespace().next();
    [Some(value), through_year, first_word]
        .into_iter()
        .flatten()
        .find_map(parse_generic)
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Last-resort parse of a free-form date.
pub fn parse_generic(text: &str) -> Option<NaiveDate> {
    let without_ordinals = ORDINAL_RE.replace_all(text, "$1");
    let normalized = without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    GENERIC_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
}

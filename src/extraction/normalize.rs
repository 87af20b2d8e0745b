//! OCR noise removal
//!
//! The recognizer reliably turns the borders, seals and flourishes of
//! pedigree certificates into a handful of stray glyphs and two or three
//! letter fragments. These lists are empirical: they name what shows up on
//! this document type and nothing more. No spelling correction happens here.

/// Glyphs produced from borders and seals. Replaced by whitespace wherever
/// they occur.
pub const NOISE_SYMBOLS: &[char] = &['|', '¦', '»', '«', '~', '©', '®', '§', '•', '¬'];

/// Fragments misread from decorative elements. Removed only when they stand
/// alone as a whitespace-separated word.
pub const NOISE_WORDS: &[&str] = &[
    "ee", "eS", "Se", "oe", "ae", "ii", "iii", "lll", "Il", "lI", "nn", "wy", "ys", "rn",
];

/// Capitalized fragments that precede parent names on the ancestry lines.
/// Stripped from the start of a candidate when followed by whitespace.
pub const NAME_NOISE_PREFIXES: &[&str] = &["Ee", "Se", "Be", "Fe", "Re", "Ae", "Oe", "Bo", "Fo"];

/// Remove noise glyphs, colons and noise words, collapse whitespace.
pub fn clean(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| {
            if c == ':' || NOISE_SYMBOLS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect();

    spaced
        .split_whitespace()
        .filter(|word| !NOISE_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`clean`] plus removal of leading parent-line fragments and stray edge
/// punctuation. Applied to every candidate value before it is stored.
pub fn clean_candidate(raw: &str) -> String {
    let mut value = clean(raw);

    loop {
        let stripped = NAME_NOISE_PREFIXES.iter().find_map(|prefix| {
            value
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(' '))
                .map(str::to_string)
        });
        match stripped {
            Some(rest) if !rest.is_empty() => value = rest,
            _ => break,
        }
    }

    value
        .trim_matches(|c: char| matches!(c, ',' | ';' | '-' | '=' | '_'))
        .trim()
        .to_string()
}

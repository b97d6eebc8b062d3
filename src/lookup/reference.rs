//! Verse reference grammar.
//!
//! Accepted forms, case-insensitive, where `,` `，` and `.` count as spaces:
//!
//! - `CODE CH V[-V]` and `CODE CH V V`
//! - `CODECH V[-V]` (code glued to the chapter)
//! - `CODE CH:V[-V]`

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::LookupError;

const PATTERNS: [&str; 3] = [
    r"^([A-Z]+)\s*(\d+)\s*(\d+)(?:[-\s](\d+))?$",
    r"^([A-Z]+)(\d+)\s*(\d+)(?:[-\s](\d+))?$",
    r"^([A-Z]+)\s*(\d+)\s*[:\s]+(\d+)(?:[-\s](\d+))?$",
];

static REFERENCE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect());

static SEPARATORS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[，,.]").ok());
static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// A parsed reference: one book, one chapter, an inclusive verse range.
///
/// # Invariants
/// - `verse_from >= 1`
/// - `verse_to >= verse_from`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseReference {
    /// Upper-cased book code.
    pub book_code: String,
    /// Chapter number.
    pub chapter: u32,
    /// First verse.
    pub verse_from: u32,
    /// Last verse.
    pub verse_to: u32,
}

impl VerseReference {
    /// Build a reference, applying the range floor rules.
    pub fn new(book_code: impl Into<String>, chapter: u32, verse_from: u32, verse_to: u32) -> Self {
        let verse_from = verse_from.max(1);
        Self {
            book_code: book_code.into().to_uppercase(),
            chapter,
            verse_from,
            verse_to: verse_to.max(verse_from),
        }
    }
}

fn normalize(input: &str) -> String {
    let spaced = match SEPARATORS.as_ref() {
        Some(re) => re.replace_all(input, " ").into_owned(),
        None => input.to_string(),
    };
    let collapsed = match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(&spaced, " ").into_owned(),
        None => spaced,
    };
    collapsed.trim().to_uppercase()
}

impl FromStr for VerseReference {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        let malformed = || LookupError::MalformedReference(s.to_string());

        let caps = REFERENCE_PATTERNS
            .iter()
            .find_map(|re| re.captures(&normalized))
            .ok_or_else(malformed)?;

        let number = |i: usize| -> Result<Option<u32>, LookupError> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| malformed()))
                .transpose()
        };

        let chapter = number(2)?.ok_or_else(malformed)?;
        let verse_from = number(3)?.ok_or_else(malformed)?;
        let verse_to = number(4)?.unwrap_or(verse_from);
        Ok(VerseReference::new(&caps[1], chapter, verse_from, verse_to))
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book_code, self.chapter, self.verse_from)?;
        if self.verse_to != self.verse_from {
            write!(f, "-{}", self.verse_to)?;
        }
        Ok(())
    }
}

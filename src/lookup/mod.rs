//! Verse lookup service.
//!
//! The operator surface resolves references through [`VerseLookup`]; the
//! mirror never talks to it. [`MemoryLookup`] is the bundled implementation
//! over a JSON verse library.

pub mod memory;
pub mod reference;

use serde::{Deserialize, Serialize};

use crate::model::{ContentPayload, LookupError, Verse};

pub use memory::{BookRecord, LibraryFile, MemoryLookup};
pub use reference::VerseReference;

/// Autocomplete entry for a book code prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSuggestion {
    /// Book code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Number of chapters in the book.
    pub chapter_count: u32,
}

/// Request/response access to the verse database.
pub trait VerseLookup: Send + Sync {
    /// Resolve a textual reference such as `"JHN 3:16-18"`.
    ///
    /// # Errors
    ///
    /// - `MalformedReference` if the text matches no grammar,
    /// - `NotFound` if the book code is unknown,
    /// - `OutOfRange` if the chapter does not exist or no verse of the range does.
    fn lookup(&self, reference: &str) -> Result<ContentPayload, LookupError>;

    /// Books whose code starts with `prefix` (case-insensitive); all books
    /// when the prefix is empty.
    fn suggest_books(&self, prefix: &str) -> Vec<BookSuggestion>;

    /// Highest verse number in a chapter.
    fn max_verse_in_chapter(&self, book_code: &str, chapter: u32) -> Result<u32, LookupError>;

    /// The verse following `after` in the same chapter.
    ///
    /// Fails with `OutOfRange` at the end of the chapter.
    fn next_verse(&self, book_code: &str, chapter: u32, after: u32) -> Result<Verse, LookupError> {
        let max = self.max_verse_in_chapter(book_code, chapter)?;
        let out_of_range = || LookupError::OutOfRange {
            book: book_code.to_string(),
            chapter,
            max,
        };
        let next = after.checked_add(1).filter(|n| *n <= max).ok_or_else(out_of_range)?;
        let reference = VerseReference::new(book_code, chapter, next, next);
        self.lookup(&reference.to_string())?
            .verses
            .into_iter()
            .next()
            .ok_or_else(out_of_range)
    }
}

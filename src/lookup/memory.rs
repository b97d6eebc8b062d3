//! In-memory verse library loaded from JSON.
//!
//! File shape:
//!
//! ```json
//! {"books": [{"code": "JHN", "name": "John", "chapters": [[{"sequenceNumber": 1, "text": "..."}]]}]}
//! ```
//!
//! `chapters[0]` is chapter 1. Books keep file order for suggestions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BookSuggestion, VerseLookup, VerseReference};
use crate::model::{AppError, ContentMeta, ContentPayload, LookupError, Verse};

/// One book of the library file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Short code used in references.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Chapters in order, each a list of verses.
    pub chapters: Vec<Vec<Verse>>,
}

/// Top-level library file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    /// Books in canonical order.
    pub books: Vec<BookRecord>,
}

/// [`VerseLookup`] over an in-memory library.
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    books: Vec<BookRecord>,
}

impl MemoryLookup {
    /// Wrap an already-parsed library.
    pub fn new(library: LibraryFile) -> Self {
        Self {
            books: library.books,
        }
    }

    /// Parse a library from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<LibraryFile>(json).map(Self::new)
    }

    /// Load a library file.
    ///
    /// # Errors
    ///
    /// `AppError::Io` if the file cannot be read, `AppError::Library` if it is
    /// not a valid library.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        let lookup = Self::from_json(&json).map_err(|e| AppError::Library {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), books = lookup.books.len(), "verse library loaded");
        Ok(lookup)
    }

    fn book(&self, code: &str) -> Result<&BookRecord, LookupError> {
        self.books
            .iter()
            .find(|book| book.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| LookupError::NotFound(code.to_string()))
    }

    fn chapter<'a>(book: &'a BookRecord, chapter: u32) -> Result<&'a [Verse], LookupError> {
        chapter
            .checked_sub(1)
            .and_then(|i| book.chapters.get(i as usize))
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::OutOfRange {
                book: book.code.clone(),
                chapter,
                max: book.chapters.len() as u32,
            })
    }
}

impl VerseLookup for MemoryLookup {
    fn lookup(&self, reference: &str) -> Result<ContentPayload, LookupError> {
        let reference: VerseReference = reference.parse()?;
        let book = self.book(&reference.book_code)?;
        let verses = Self::chapter(book, reference.chapter)?;

        let selected: Vec<Verse> = verses
            .iter()
            .filter(|v| (reference.verse_from..=reference.verse_to).contains(&v.sequence_number))
            .cloned()
            .collect();
        let Some(last) = selected.last().map(|v| v.sequence_number) else {
            return Err(LookupError::OutOfRange {
                book: book.code.clone(),
                chapter: reference.chapter,
                max: verses.iter().map(|v| v.sequence_number).max().unwrap_or(0),
            });
        };

        tracing::debug!(%reference, verses = selected.len(), "reference resolved");
        Ok(ContentPayload::new(
            ContentMeta {
                book_code: book.code.clone(),
                book_name: book.name.clone(),
                chapter_number: reference.chapter,
                range: [reference.verse_from, reference.verse_to.min(last)],
            },
            selected,
        ))
    }

    fn suggest_books(&self, prefix: &str) -> Vec<BookSuggestion> {
        let prefix = prefix.trim().to_uppercase();
        self.books
            .iter()
            .filter(|book| book.code.to_uppercase().starts_with(&prefix))
            .map(|book| BookSuggestion {
                code: book.code.clone(),
                name: book.name.clone(),
                chapter_count: book.chapters.len() as u32,
            })
            .collect()
    }

    fn max_verse_in_chapter(&self, book_code: &str, chapter: u32) -> Result<u32, LookupError> {
        let book = self.book(book_code)?;
        let verses = Self::chapter(book, chapter)?;
        Ok(verses.iter().map(|v| v.sequence_number).max().unwrap_or(0))
    }
}

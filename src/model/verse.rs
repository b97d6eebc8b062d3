//! Verse content as delivered by the lookup service.

use serde::{Deserialize, Serialize};

/// A single verse. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// 1-based verse number within its chapter.
    pub sequence_number: u32,
    /// Verse text, rendered after the `"{n}. "` prefix.
    pub text: String,
}

impl Verse {
    /// Create a verse.
    pub fn new(sequence_number: u32, text: impl Into<String>) -> Self {
        Self {
            sequence_number,
            text: text.into(),
        }
    }

    /// Text of the rendered verse block: `"{sequenceNumber}. {text}"`.
    ///
    /// This is the exact string fed to the wrapper on both surfaces.
    pub fn block_text(&self) -> String {
        format!("{}. {}", self.sequence_number, self.text)
    }
}

/// Descriptive header of a content payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMeta {
    /// Short book code used to query the lookup service (e.g. `"JHN"`).
    #[serde(default)]
    pub book_code: String,
    /// Display name of the book.
    pub book_name: String,
    /// Chapter number.
    pub chapter_number: u32,
    /// Inclusive verse range `[start, end]`.
    pub range: [u32; 2],
}

/// A passage: header plus verses ordered by sequence number.
///
/// Mutated only by wholesale replacement or by [`ContentPayload::append_verse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    /// Passage header.
    pub meta: ContentMeta,
    /// Verses in ascending sequence order.
    pub verses: Vec<Verse>,
}

impl ContentPayload {
    /// Create a payload.
    pub fn new(meta: ContentMeta, verses: Vec<Verse>) -> Self {
        Self { meta, verses }
    }

    /// Number of verses held.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// True when no verses are held.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Highest sequence number present, if any.
    pub fn max_sequence_number(&self) -> Option<u32> {
        self.verses.iter().map(|v| v.sequence_number).max()
    }

    /// Append one verse at the tail and extend `range[1]` to it.
    pub fn append_verse(&mut self, verse: Verse) {
        self.meta.range[1] = verse.sequence_number;
        self.verses.push(verse);
    }

    /// Title line shown above the verses.
    pub fn title(&self) -> String {
        format!(
            "{} {}:{}-{}",
            self.meta.book_name, self.meta.chapter_number, self.meta.range[0], self.meta.range[1]
        )
    }

    /// Whether `next` extends `self` by tail-append rather than replacing it.
    ///
    /// True iff book name, chapter and range start match, `next` holds strictly
    /// more verses and its range end is strictly greater. Unrelated content that
    /// happens to share this metadata is misclassified as an append; callers
    /// accept that limitation.
    pub fn is_extended_by(&self, next: &ContentPayload) -> bool {
        self.meta.book_name == next.meta.book_name
            && self.meta.chapter_number == next.meta.chapter_number
            && self.meta.range[0] == next.meta.range[0]
            && next.verses.len() > self.verses.len()
            && next.meta.range[1] > self.meta.range[1]
    }
}

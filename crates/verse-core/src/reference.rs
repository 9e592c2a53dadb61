//! Resolved scripture locations.

use crate::canon::BookId;
use serde::Serialize;
use std::fmt;
use ts_rs::TS;

/// A single verse: book, chapter and verse, all 1-indexed and within the
/// bounds of the canon tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Reference {
    pub book: BookId,
    pub chapter: u32,
    pub verse: u32,
}

impl Reference {
    /// Returns `None` when the chapter or verse does not exist in `book`.
    pub fn new(book: BookId, chapter: u32, verse: u32) -> Option<Self> {
        let verses = book.verse_count(chapter)?;
        (1..=verses).contains(&verse).then_some(Self {
            book,
            chapter,
            verse,
        })
    }

    pub fn chapter_ref(self) -> ChapterRef {
        ChapterRef {
            book: self.book,
            chapter: self.chapter,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book.name(), self.chapter, self.verse)
    }
}

/// A whole chapter with no particular verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct ChapterRef {
    pub book: BookId,
    pub chapter: u32,
}

impl ChapterRef {
    pub fn new(book: BookId, chapter: u32) -> Option<Self> {
        book.verse_count(chapter)?;
        Some(Self { book, chapter })
    }

    pub fn first_verse(self) -> Reference {
        Reference {
            book: self.book,
            chapter: self.chapter,
            verse: 1,
        }
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book.name(), self.chapter)
    }
}

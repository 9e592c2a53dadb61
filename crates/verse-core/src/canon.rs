//! Canon metadata: the 66 books, their display names and abbreviations, and
//! which chapters and verses exist in each of them.
//!
//! All tables are static. The lower-cased abbreviation and USFM indexes are
//! built once on first use and are read-only afterwards, so lookups can be
//! shared freely across threads.

mod tables;

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

/// Number of books in the canon.
pub const BOOK_COUNT: u8 = 66;
const FIRST_NEW_TESTAMENT_BOOK: u8 = 40;

static ABBREVIATION_INDEX: Lazy<HashMap<String, BookId>> = Lazy::new(build_abbreviation_index);
static USFM_INDEX: Lazy<HashMap<&'static str, BookId>> = Lazy::new(|| {
    BookId::all()
        .map(|book| (tables::USFM_CODES[book.index()], book))
        .collect()
});

/// Identifier of a canonical book, 1 (Genesis) through 66 (Revelation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct BookId(u8);

impl BookId {
    pub const GENESIS: BookId = BookId(1);
    pub const REVELATION: BookId = BookId(BOOK_COUNT);

    pub fn new(id: u8) -> Option<Self> {
        (1..=BOOK_COUNT).contains(&id).then_some(Self(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All books in canonical order.
    pub fn all() -> impl DoubleEndedIterator<Item = BookId> + ExactSizeIterator {
        (1..=BOOK_COUNT).map(BookId)
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn name(self) -> &'static str {
        tables::BOOK_NAMES[self.index()]
    }

    pub fn usfm(self) -> &'static str {
        tables::USFM_CODES[self.index()]
    }

    pub fn testament(self) -> Testament {
        if self.0 < FIRST_NEW_TESTAMENT_BOOK {
            Testament::Old
        } else {
            Testament::New
        }
    }

    pub fn chapter_count(self) -> u32 {
        tables::VERSE_COUNTS[self.index()].len() as u32
    }

    /// Verse count of `chapter`, or `None` when the book has no such chapter.
    pub fn verse_count(self, chapter: u32) -> Option<u32> {
        let idx = usize::try_from(chapter.checked_sub(1)?).ok()?;
        tables::VERSE_COUNTS[self.index()]
            .get(idx)
            .map(|&count| u32::from(count))
    }

    pub fn next(self) -> Option<BookId> {
        BookId::new(self.0 + 1)
    }

    pub fn previous(self) -> Option<BookId> {
        BookId::new(self.0 - 1)
    }

    /// Exact, case-insensitive abbreviation lookup. Full display names count
    /// as abbreviations too.
    pub fn from_abbreviation(text: &str) -> Option<BookId> {
        ABBREVIATION_INDEX.get(&text.to_lowercase()).copied()
    }

    /// Case-insensitive USFM identifier lookup (`jhn`, `1CO`, ...).
    pub fn from_usfm(code: &str) -> Option<BookId> {
        USFM_INDEX.get(code.to_ascii_uppercase().as_str()).copied()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Testament {
    Old,
    New,
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        };
        write!(f, "{}", label)
    }
}

fn build_abbreviation_index() -> HashMap<String, BookId> {
    let mut index = HashMap::new();
    for book in BookId::all() {
        let names = std::iter::once(book.name())
            .chain(tables::ABBREVIATIONS[book.index()].iter().copied());
        for name in names {
            if let Some(previous) = index.insert(name.to_lowercase(), book) {
                tracing::warn!(
                    abbreviation = name,
                    %previous,
                    %book,
                    "Duplicate book abbreviation"
                );
            }
        }
    }
    tracing::debug!(entries = index.len(), "Built book abbreviation index");
    index
}

/// Every recognized abbreviation with the book it maps to, lower-cased.
pub fn abbreviations() -> impl Iterator<Item = (&'static str, BookId)> {
    ABBREVIATION_INDEX
        .iter()
        .map(|(abbreviation, book)| (abbreviation.as_str(), *book))
}

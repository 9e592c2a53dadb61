//! Stepping through the canon one chapter at a time.

use crate::reference::ChapterRef;

/// The chapter after `current`, crossing into the next book after a book's
/// last chapter. `None` after Revelation 22.
pub fn next_chapter(current: ChapterRef) -> Option<ChapterRef> {
    if current.chapter < current.book.chapter_count() {
        return ChapterRef::new(current.book, current.chapter + 1);
    }
    let book = current.book.next()?;
    ChapterRef::new(book, 1)
}

/// The chapter before `current`, crossing into the last chapter of the
/// previous book. `None` before Genesis 1.
pub fn previous_chapter(current: ChapterRef) -> Option<ChapterRef> {
    if current.chapter > 1 {
        return ChapterRef::new(current.book, current.chapter - 1);
    }
    let book = current.book.previous()?;
    ChapterRef::new(book, book.chapter_count())
}

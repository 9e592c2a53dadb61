//! Location-hash routes for chapters, e.g. `#JHN3` or `#1CO13`.

use crate::canon::BookId;
use crate::reference::ChapterRef;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([A-Za-z0-9_]{3})([0-9]+)$").unwrap());

pub fn format_route(chapter: ChapterRef) -> String {
    format!("#{}{}", chapter.book.usfm(), chapter.chapter)
}

/// Parse a hash route. Unknown book codes and chapters that do not exist
/// yield `None`.
pub fn parse_route(hash: &str) -> Option<ChapterRef> {
    let caps = RE_ROUTE.captures(hash)?;
    let book = BookId::from_usfm(&caps[1])?;
    let chapter = caps[2].parse::<u32>().ok()?;
    ChapterRef::new(book, chapter)
}

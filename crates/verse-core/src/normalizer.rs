//! Splits free text into a book-name fragment and optional chapter/verse
//! numbers.
//!
//! Accepted shape, after lower-casing:
//!
//! ```text
//! [digits][whitespace] letter any+ [ digits [ separators digits ] ]
//! ```
//!
//! The book fragment is the shortest prefix (at least a letter plus one more
//! character) after which the remainder is empty, a chapter number, or a
//! chapter number followed by non-word separators and a verse number.
//! Non-word separators are anything except ASCII letters, digits and `_`.

use serde::Serialize;
use ts_rs::TS;

/// Intermediate result of [`normalize`]. Lives for a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ParsedQuery {
    /// Trimmed, lower-cased book-name fragment.
    pub book_fragment: String,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
}

impl ParsedQuery {
    /// Requested chapter; 1 when omitted.
    pub fn requested_chapter(&self) -> u32 {
        self.chapter.unwrap_or(1)
    }

    /// Requested verse; 1 when omitted.
    pub fn requested_verse(&self) -> u32 {
        self.verse.unwrap_or(1)
    }
}

/// Parse `query` into its fragments, or `None` when it does not have the
/// accepted shape (empty input, no letters, ...).
pub fn normalize(query: &str) -> Option<ParsedQuery> {
    let lowered = query.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();

    let digits = chars.iter().take_while(|ch| ch.is_ascii_digit()).count();
    let spaces = chars[digits..]
        .iter()
        .take_while(|ch| ch.is_whitespace())
        .count();
    let letter_idx = digits + spaces;
    if !chars.get(letter_idx)?.is_ascii_alphabetic() {
        return None;
    }

    for end in letter_idx + 2..=chars.len() {
        if is_line_terminator(chars[end - 1]) {
            return None;
        }
        if let Some((chapter, verse)) = split_numbers(&chars[end..]) {
            let fragment: String = chars[..end].iter().collect();
            return Some(ParsedQuery {
                book_fragment: fragment.trim().to_string(),
                chapter,
                verse,
            });
        }
    }
    None
}

/// Match the trailing `[digits [separators digits]]` part, which must run to
/// the end of the input.
fn split_numbers(tail: &[char]) -> Option<(Option<u32>, Option<u32>)> {
    if tail.is_empty() {
        return Some((None, None));
    }

    let chapter_len = tail.iter().take_while(|ch| ch.is_ascii_digit()).count();
    if chapter_len == 0 {
        return None;
    }
    let chapter = parse_number(&tail[..chapter_len]);
    let rest = &tail[chapter_len..];
    if rest.is_empty() {
        return Some((Some(chapter), None));
    }

    let separator_len = rest.iter().take_while(|ch| !is_word_char(**ch)).count();
    let verse_digits = &rest[separator_len..];
    if !verse_digits.is_empty() && verse_digits.iter().all(char::is_ascii_digit) {
        return Some((Some(chapter), Some(parse_number(verse_digits))));
    }
    None
}

/// Decimal value of an ASCII digit run; saturates so oversized numbers are
/// simply out of range.
fn parse_number(digits: &[char]) -> u32 {
    digits
        .iter()
        .filter_map(|ch| ch.to_digit(10))
        .fold(0u32, |acc, digit| {
            acc.saturating_mul(10).saturating_add(digit)
        })
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(fragment: &str, chapter: Option<u32>, verse: Option<u32>) -> Option<ParsedQuery> {
        Some(ParsedQuery {
            book_fragment: fragment.to_string(),
            chapter,
            verse,
        })
    }

    #[test]
    fn splits_book_chapter_and_verse() {
        assert_eq!(normalize("John 3:16"), parsed("john", Some(3), Some(16)));
        assert_eq!(normalize("jn3.16"), parsed("jn", Some(3), Some(16)));
        assert_eq!(normalize("john 3 16"), parsed("john", Some(3), Some(16)));
        assert_eq!(normalize("John 03 : 016"), parsed("john", Some(3), Some(16)));
    }

    #[test]
    fn keeps_leading_number_in_fragment() {
        assert_eq!(
            normalize("1 Corinthians 13"),
            parsed("1 corinthians", Some(13), None)
        );
        assert_eq!(normalize("2kgs 4:2"), parsed("2kgs", Some(4), Some(2)));
    }

    #[test]
    fn numbers_are_optional() {
        assert_eq!(normalize("Psa"), parsed("psa", None, None));
        let query = normalize("  Matthew  ").unwrap();
        assert_eq!(query.book_fragment, "matthew");
        assert_eq!(query.requested_chapter(), 1);
        assert_eq!(query.requested_verse(), 1);
    }

    #[test]
    fn rejects_inputs_without_a_book_fragment() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("1:1"), None);
        assert_eq!(normalize("42"), None);
        assert_eq!(normalize("p"), None);
        assert_eq!(normalize(":john 3"), None);
    }

    #[test]
    fn chapter_digits_are_taken_greedily() {
        assert_eq!(normalize("john 316"), parsed("john", Some(316), None));
    }

    #[test]
    fn digits_inside_the_name_stay_in_the_fragment() {
        assert_eq!(
            normalize("song 2 of songs"),
            parsed("song 2 of songs", None, None)
        );
        assert_eq!(normalize("john 3:16a"), parsed("john 3:16a", None, None));
        assert_eq!(normalize("john 3 "), parsed("john 3", None, None));
        assert_eq!(normalize("john 3_16"), parsed("john 3_", Some(16), None));
    }

    #[test]
    fn zero_and_oversized_numbers_are_kept_for_bounds_checks() {
        assert_eq!(normalize("john 0"), parsed("john", Some(0), None));
        assert_eq!(
            normalize("john 99999999999:1"),
            parsed("john", Some(u32::MAX), Some(1))
        );
    }

    #[test]
    fn fragment_cannot_span_lines() {
        assert_eq!(normalize("john\n3"), None);
        assert_eq!(normalize("john 3\n16"), parsed("john", Some(3), Some(16)));
    }
}

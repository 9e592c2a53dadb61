//! Candidate elimination: turns a parsed query into a single reference.
//!
//! Resolution seeds a candidate set (one book on an exact abbreviation hit,
//! otherwise the whole canon) and then removes books in a fixed order:
//! name match, chapter bounds, verse bounds. Exactly one survivor resolves;
//! anything else is no match. [`explain`] exposes every stage so callers can
//! tell ambiguity apart from an unknown book or an out-of-range number.

use crate::canon::BookId;
use crate::normalizer::{ParsedQuery, normalize};
use crate::reference::Reference;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};
use ts_rs::TS;

/// Books still in the running during one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    books: BTreeSet<BookId>,
}

impl CandidateSet {
    pub fn all() -> Self {
        Self {
            books: BookId::all().collect(),
        }
    }

    pub fn single(book: BookId) -> Self {
        Self {
            books: BTreeSet::from([book]),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, book: BookId) -> bool {
        self.books.contains(&book)
    }

    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.books.iter().copied()
    }

    /// Removes every book failing `keep`. The set only ever shrinks.
    pub fn retain(&mut self, mut keep: impl FnMut(BookId) -> bool) {
        self.books.retain(|book| keep(*book));
    }

    /// The surviving book, when exactly one is left.
    pub fn sole(&self) -> Option<BookId> {
        match self.books.len() {
            1 => self.books.first().copied(),
            _ => None,
        }
    }
}

/// How the candidate set was seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Seed {
    /// The fragment is a recognized abbreviation of `book`.
    Abbreviation { book: BookId },
    AllBooks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    Seed,
    NameFilter,
    ChapterBounds,
    VerseBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct StageReport {
    pub stage: Stage,
    #[ts(type = "number")]
    pub remaining: usize,
    pub skipped: bool,
}

/// Result of one resolution, with the reason when nothing resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    Resolved { reference: Reference },
    /// The text does not have the `name [chapter [verse]]` shape.
    Malformed,
    /// No book name matched the fragment.
    Unrecognized,
    /// Some books matched by name but none has the requested chapter/verse.
    OutOfRange,
    /// Several books survived every filter.
    Ambiguous { candidates: Vec<BookId> },
}

impl Outcome {
    pub fn reference(&self) -> Option<Reference> {
        match self {
            Outcome::Resolved { reference } => Some(*reference),
            _ => None,
        }
    }
}

/// Full account of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ResolutionTrace {
    pub query: String,
    pub parsed: Option<ParsedQuery>,
    pub seed: Option<Seed>,
    pub stages: Vec<StageReport>,
    pub outcome: Outcome,
}

/// Resolve free text such as `John 3:16`, `jn3.16` or `1 Cor 13`. Chapter
/// and verse default to 1. `None` covers malformed input, unknown or
/// ambiguous books and out-of-range numbers alike.
pub fn resolve(text: &str) -> Option<Reference> {
    explain(text).outcome.reference()
}

/// Resolve an already parsed query.
pub fn resolve_parsed(parsed: &ParsedQuery) -> Option<Reference> {
    eliminate(parsed).outcome.reference()
}

/// Like [`resolve`], but reports every elimination stage and why resolution
/// failed.
pub fn explain(text: &str) -> ResolutionTrace {
    let Some(parsed) = normalize(text) else {
        debug!(query = text, "Query does not look like a reference");
        return ResolutionTrace {
            query: text.to_string(),
            parsed: None,
            seed: None,
            stages: Vec::new(),
            outcome: Outcome::Malformed,
        };
    };

    let elimination = eliminate(&parsed);
    debug!(
        query = text,
        fragment = %parsed.book_fragment,
        outcome = ?elimination.outcome,
        "Resolved query"
    );
    ResolutionTrace {
        query: text.to_string(),
        parsed: Some(parsed),
        seed: Some(elimination.seed),
        stages: elimination.stages,
        outcome: elimination.outcome,
    }
}

struct Elimination {
    seed: Seed,
    stages: Vec<StageReport>,
    outcome: Outcome,
}

fn eliminate(parsed: &ParsedQuery) -> Elimination {
    let fragment = parsed.book_fragment.trim().to_lowercase();
    let chapter = parsed.requested_chapter();
    let verse = parsed.requested_verse();
    let mut stages = Vec::with_capacity(4);

    let (seed, mut candidates) = match BookId::from_abbreviation(&fragment) {
        Some(book) => (Seed::Abbreviation { book }, CandidateSet::single(book)),
        None => (Seed::AllBooks, CandidateSet::all()),
    };
    record(&mut stages, Stage::Seed, &candidates, false);

    let by_abbreviation = matches!(seed, Seed::Abbreviation { .. });
    if !by_abbreviation {
        candidates.retain(|book| name_matches(&fragment, &book.name().to_lowercase()));
    }
    record(&mut stages, Stage::NameFilter, &candidates, by_abbreviation);
    let named = candidates.len();

    candidates.retain(|book| (1..=book.chapter_count()).contains(&chapter));
    record(&mut stages, Stage::ChapterBounds, &candidates, false);

    candidates.retain(|book| {
        book.verse_count(chapter)
            .is_some_and(|verses| (1..=verses).contains(&verse))
    });
    record(&mut stages, Stage::VerseBounds, &candidates, false);

    let outcome = match candidates.sole() {
        Some(book) => Outcome::Resolved {
            reference: Reference {
                book,
                chapter,
                verse,
            },
        },
        None if named == 0 => Outcome::Unrecognized,
        None if candidates.is_empty() => Outcome::OutOfRange,
        None => Outcome::Ambiguous {
            candidates: candidates.iter().collect(),
        },
    };

    Elimination {
        seed,
        stages,
        outcome,
    }
}

fn record(stages: &mut Vec<StageReport>, stage: Stage, candidates: &CandidateSet, skipped: bool) {
    trace!(?stage, remaining = candidates.len(), skipped, "Candidate elimination stage");
    stages.push(StageReport {
        stage,
        remaining: candidates.len(),
        skipped,
    });
}

/// Name filter for one candidate. A numbered book ("1 corinthians") needs
/// the fragment to start with the same number; every book needs the
/// fragment to be an in-order subsequence of its name starting on the same
/// first character.
fn name_matches(fragment: &str, book_name: &str) -> bool {
    let number_len = book_name
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .count();
    if number_len > 0 && !fragment.starts_with(&book_name[..number_len]) {
        return false;
    }

    let same_start = match fragment.chars().next() {
        Some(first) => book_name.starts_with(first),
        None => true,
    };
    same_start && is_subsequence(fragment, book_name)
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut remaining = haystack.chars();
    needle
        .chars()
        .all(|wanted| remaining.any(|ch| ch == wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::abbreviations;

    fn reference(book: u8, chapter: u32, verse: u32) -> Option<Reference> {
        Some(Reference {
            book: BookId::new(book).expect("valid book id"),
            chapter,
            verse,
        })
    }

    fn book_ids(ids: &[u8]) -> Vec<BookId> {
        ids.iter().filter_map(|id| BookId::new(*id)).collect()
    }

    #[test]
    fn resolves_common_forms() {
        assert_eq!(resolve("John 3:16"), reference(43, 3, 16));
        assert_eq!(resolve("jn3.16"), reference(43, 3, 16));
        assert_eq!(resolve("1 Corinthians 13"), reference(46, 13, 1));
    }

    #[test]
    fn defaults_to_first_verse() {
        assert_eq!(resolve("Matthew 1"), reference(40, 1, 1));
    }

    #[test]
    fn defaults_to_first_chapter() {
        assert_eq!(resolve("Psa"), reference(19, 1, 1));
        assert_eq!(resolve("joh"), reference(43, 1, 1));
    }

    #[test]
    fn no_match_when_ambiguous_or_malformed() {
        assert_eq!(resolve("P 1:1"), None);
        assert_eq!(resolve("1:1"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn subsequence_matches_partial_names() {
        assert_eq!(resolve("Revel 22:21"), reference(66, 22, 21));
        assert_eq!(resolve("Dtrnmy 6:4"), reference(5, 6, 4));
        assert_eq!(resolve("2 Corin 5:17"), reference(47, 5, 17));
        assert_eq!(resolve("1 Corin 5:7"), reference(46, 5, 7));
    }

    #[test]
    fn numbered_books_need_matching_number() {
        assert_eq!(resolve("3 Jo"), reference(64, 1, 1));
        assert_eq!(resolve("3 Jn 1:14"), reference(64, 1, 14));
        assert_eq!(resolve("4 John"), None);
    }

    #[test]
    fn first_character_anchors_the_match() {
        let trace = explain("ohn 3:16");
        assert_eq!(trace.outcome, Outcome::Unrecognized);
    }

    #[test]
    fn bounds_filters_break_ties() {
        // "jo" names Joshua, Job, Joel, Jonah and John.
        assert_eq!(
            explain("jo 1").outcome,
            Outcome::Ambiguous {
                candidates: book_ids(&[6, 18, 29, 32, 43])
            }
        );
        assert_eq!(resolve("jo 42"), reference(18, 42, 1));
        assert_eq!(resolve("jo 21:40"), reference(6, 21, 40));
        assert_eq!(resolve("j 50"), reference(24, 50, 1));
    }

    #[test]
    fn explains_failure_reasons() {
        assert_eq!(explain("1:1").outcome, Outcome::Malformed);
        assert!(explain("1:1").parsed.is_none());
        assert_eq!(explain("xyz 1:1").outcome, Outcome::Unrecognized);
        assert_eq!(explain("Obadiah 2").outcome, Outcome::OutOfRange);
        assert_eq!(explain("Jude 1:26").outcome, Outcome::OutOfRange);
        assert_eq!(explain("John 0").outcome, Outcome::OutOfRange);
        assert_eq!(
            explain("P 1:1").outcome,
            Outcome::Ambiguous {
                candidates: book_ids(&[19, 20, 50, 57])
            }
        );
    }

    #[test]
    fn abbreviation_seed_skips_name_filter() {
        let trace = explain("Song of Songs 2:1");
        assert_eq!(
            trace.seed,
            Some(Seed::Abbreviation {
                book: BookId::new(22).unwrap()
            })
        );
        assert_eq!(trace.stages.len(), 4);
        assert!(trace.stages[1].skipped);
        assert_eq!(trace.outcome.reference(), reference(22, 2, 1));
    }

    #[test]
    fn every_abbreviation_resolves_to_its_book() {
        for (abbreviation, book) in abbreviations() {
            assert_eq!(
                resolve(&format!("{abbreviation} 1:1")),
                reference(book.get(), 1, 1),
                "abbreviation {abbreviation:?}"
            );
        }
    }

    #[test]
    fn canonical_rendering_resolves_to_itself() {
        for book in BookId::all() {
            for chapter in 1..=book.chapter_count() {
                let last = book.verse_count(chapter).unwrap();
                for verse in [1, last] {
                    let expected = reference(book.get(), chapter, verse);
                    let rendered = expected.unwrap().to_string();
                    assert_eq!(resolve(&rendered), expected, "{rendered}");
                }
            }
        }
    }

    #[test]
    fn out_of_range_boundaries() {
        for book in BookId::all() {
            let name = book.name();
            let chapters = book.chapter_count();
            assert_eq!(resolve(&format!("{name} {}", chapters + 1)), None);

            let verses = book.verse_count(1).unwrap();
            assert_eq!(
                resolve(&format!("{name} 1:{verses}")),
                reference(book.get(), 1, verses)
            );
            assert_eq!(resolve(&format!("{name} 1:{}", verses + 1)), None);
        }
    }

    #[test]
    fn elimination_is_monotonic() {
        for query in [
            "John 3:16", "jo 1", "P 1:1", "Obadiah 2", "xyz", "1 Corin 5:7", "ps 119:176",
            "j 50", "Ma 28:20", "2 t 4",
        ] {
            let trace = explain(query);
            let sizes: Vec<usize> = trace.stages.iter().map(|stage| stage.remaining).collect();
            assert_eq!(sizes.len(), 4, "{query}");
            assert!(sizes.windows(2).all(|pair| pair[0] >= pair[1]), "{query}: {sizes:?}");
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        for query in ["jo 1", "Gen 50:26", "rom 8 28"] {
            assert_eq!(explain(query), explain(query));
        }
    }

    #[test]
    fn resolves_parsed_queries() {
        let parsed = ParsedQuery {
            book_fragment: "rom".to_string(),
            chapter: Some(8),
            verse: Some(28),
        };
        assert_eq!(resolve_parsed(&parsed), reference(45, 8, 28));
    }

    #[test]
    fn trace_serializes_with_tagged_outcome() {
        let json = serde_json::to_value(explain("Jn 3:16")).unwrap();
        assert_eq!(json["outcome"]["kind"], "resolved");
        assert_eq!(json["outcome"]["reference"]["book"], 43);
        assert_eq!(json["seed"]["kind"], "abbreviation");
        assert_eq!(json["stages"][1]["stage"], "name_filter");
    }
}

//! Natural-language scripture reference resolution.
//!
//! Free text (`"jn3.16"`, `"1 Corinthians 13"`) or a speech transcript
//! (`"first John chapter 4 verse 8"`) goes in; a fully disambiguated book,
//! chapter and verse comes out, or nothing when the text is malformed,
//! ambiguous or out of range. Everything here is synchronous and works on
//! immutable static tables, so it can be called from any thread.

pub mod bindings;
pub mod canon;
pub mod navigation;
pub mod normalizer;
pub mod reference;
pub mod resolver;
pub mod route;
pub mod speech;

pub use bindings::export_ts_bindings;
pub use canon::{BookId, Testament};
pub use navigation::{next_chapter, previous_chapter};
pub use normalizer::{ParsedQuery, normalize};
pub use reference::{ChapterRef, Reference};
pub use resolver::{CandidateSet, Outcome, ResolutionTrace, explain, resolve, resolve_parsed};
pub use route::{format_route, parse_route};
pub use speech::{
    SpeechTarget, SpokenQuery, explain_from_speech, resolve_from_speech, spoken_query,
};

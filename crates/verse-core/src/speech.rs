//! Spoken-form references ("first Corinthians chapter thirteen" as a speech
//! engine transcribes it: "1st Corinthians chapter 13").
//!
//! Ordinals are rewritten to leading digits, then the utterance must contain
//! `chapter <n>`, optionally followed by `verse <m>`. The rewritten text is
//! handed to the regular resolver.

use crate::reference::{ChapterRef, Reference};
use crate::resolver::{ResolutionTrace, explain};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;
use unicode_normalization::UnicodeNormalization;

static RE_FIRST: Lazy<Regex> = Lazy::new(|| Regex::new(r"1st|first").unwrap());
static RE_SECOND: Lazy<Regex> = Lazy::new(|| Regex::new(r"2nd|second").unwrap());
static RE_THIRD: Lazy<Regex> = Lazy::new(|| Regex::new(r"3rd|third").unwrap());
static RE_DIGIT_TH: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])th").unwrap());
static RE_CHAPTER_VERSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([^\n\r\x{2028}\x{2029}]*?)\s*chapter\s+([0-9]+)(?:\s+verse\s+([0-9]+))?$")
        .unwrap()
});

/// What an utterance resolved to. A chapter without a verse means "the
/// whole chapter", not verse 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
#[ts(export)]
pub enum SpeechTarget {
    Chapter(ChapterRef),
    Verse(Reference),
}

impl SpeechTarget {
    pub fn chapter_ref(&self) -> ChapterRef {
        match self {
            SpeechTarget::Chapter(chapter) => *chapter,
            SpeechTarget::Verse(reference) => reference.chapter_ref(),
        }
    }

    /// The requested verse, if the utterance named one.
    pub fn verse(&self) -> Option<u32> {
        match self {
            SpeechTarget::Chapter(_) => None,
            SpeechTarget::Verse(reference) => Some(reference.verse),
        }
    }
}

/// Resolver input assembled from an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenQuery {
    /// `"<book> <chapter>"` or `"<book> <chapter>:<verse>"`.
    pub text: String,
    pub has_verse: bool,
}

/// Rewrite an utterance into resolver input, or `None` when it has no
/// `chapter <n>` anchor.
pub fn spoken_query(utterance: &str) -> Option<SpokenQuery> {
    let normalized = rewrite_ordinals(utterance);
    let Some(caps) = RE_CHAPTER_VERSE.captures(&normalized) else {
        tracing::debug!(utterance, "No chapter anchor in utterance");
        return None;
    };

    let book = caps.get(1).map_or("", |m| m.as_str());
    let chapter = &caps[2];
    Some(match caps.get(3) {
        Some(verse) => SpokenQuery {
            text: format!("{book} {chapter}:{}", verse.as_str()),
            has_verse: true,
        },
        None => SpokenQuery {
            text: format!("{book} {chapter}"),
            has_verse: false,
        },
    })
}

/// Resolve a transcribed utterance such as `John chapter 3 verse 16`.
/// Returns `None` without consulting the resolver when there is no
/// `chapter <n>` anchor.
pub fn resolve_from_speech(utterance: &str) -> Option<SpeechTarget> {
    explain_from_speech(utterance).0
}

/// Like [`resolve_from_speech`], but also returns the resolver trace. The
/// trace is `None` when the utterance has no `chapter <n>` anchor.
pub fn explain_from_speech(utterance: &str) -> (Option<SpeechTarget>, Option<ResolutionTrace>) {
    let Some(query) = spoken_query(utterance) else {
        return (None, None);
    };
    let trace = explain(&query.text);
    let target = trace.outcome.reference().map(|reference| {
        if query.has_verse {
            SpeechTarget::Verse(reference)
        } else {
            SpeechTarget::Chapter(reference.chapter_ref())
        }
    });
    tracing::debug!(utterance, ?target, "Resolved utterance");
    (target, Some(trace))
}

/// NFKC-fold, lower-case and turn ordinals into plain digits.
fn rewrite_ordinals(utterance: &str) -> String {
    let folded: String = utterance.nfkc().collect();
    let mut text = folded.to_lowercase();
    text = RE_FIRST.replace_all(&text, "1").to_string();
    text = RE_SECOND.replace_all(&text, "2").to_string();
    text = RE_THIRD.replace_all(&text, "3").to_string();
    text = RE_DIGIT_TH.replace_all(&text, "$1").to_string();
    text
}

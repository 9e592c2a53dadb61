//! Per-query evaluation and rendering.

use crate::config::{AppConfig, InputMode, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use verse_core::resolver::Stage;
use verse_core::{
    ChapterRef, Outcome, ResolutionTrace, SpeechTarget, explain, explain_from_speech,
    format_route, next_chapter, previous_chapter,
};

/// Everything printed for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub display: Option<String>,
    pub route: Option<String>,
    pub result: Option<SpeechTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<ResolutionTrace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<ChapterRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<ChapterRef>,
}

impl QueryReport {
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }
}

pub fn evaluate(query: &str, config: &AppConfig) -> QueryReport {
    let (result, trace) = match config.input_mode {
        InputMode::Text => {
            let trace = explain(query);
            (trace.outcome.reference().map(SpeechTarget::Verse), Some(trace))
        }
        InputMode::Speech => explain_from_speech(query),
    };

    let chapter = result.map(|target| target.chapter_ref());
    let neighbors = |step: fn(ChapterRef) -> Option<ChapterRef>| {
        chapter.filter(|_| config.show_neighbors).and_then(step)
    };

    QueryReport {
        query: query.to_string(),
        display: result.map(|target| match target {
            SpeechTarget::Chapter(chapter) => chapter.to_string(),
            SpeechTarget::Verse(reference) => reference.to_string(),
        }),
        route: chapter
            .filter(|_| config.show_route)
            .map(format_route),
        result,
        trace: trace.filter(|_| config.explain),
        next: neighbors(next_chapter),
        previous: neighbors(previous_chapter),
    }
}

pub fn render(report: &QueryReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(report)),
        OutputFormat::Json => serde_json::to_string(report).context("Failed to encode report"),
    }
}

fn render_plain(report: &QueryReport) -> String {
    let Some(display) = &report.display else {
        let mut line = format!("no match: {}", report.query);
        if let Some(trace) = &report.trace {
            line.push_str(&format!("  ({})", failure_reason(&trace.outcome)));
        }
        return line;
    };

    let mut line = display.clone();
    if let Some(route) = &report.route {
        line.push_str(&format!("  {route}"));
    }
    if let Some(previous) = &report.previous {
        line.push_str(&format!("  prev {previous}"));
    }
    if let Some(next) = &report.next {
        line.push_str(&format!("  next {next}"));
    }
    if let Some(trace) = &report.trace {
        line.push_str(&format!("  [{}]", stage_summary(trace)));
    }
    line
}

fn failure_reason(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Resolved { reference } => format!("resolved to {reference}"),
        Outcome::Malformed => "not a reference".to_string(),
        Outcome::Unrecognized => "unknown book".to_string(),
        Outcome::OutOfRange => "chapter or verse out of range".to_string(),
        Outcome::Ambiguous { candidates } => {
            let names: Vec<&str> = candidates.iter().map(|book| book.name()).collect();
            format!("ambiguous: {}", names.join(", "))
        }
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Seed => "seed",
        Stage::NameFilter => "name_filter",
        Stage::ChapterBounds => "chapter_bounds",
        Stage::VerseBounds => "verse_bounds",
    }
}

fn stage_summary(trace: &ResolutionTrace) -> String {
    trace
        .stages
        .iter()
        .map(|report| {
            let stage = stage_label(report.stage);
            if report.skipped {
                format!("{stage} skipped")
            } else {
                format!("{stage} {}", report.remaining)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn plain_line_has_display_and_route() {
        let report = evaluate("jn3.16", &config());
        assert!(report.is_resolved());
        assert_eq!(render_plain(&report), "John 3:16  #JHN3");
    }

    #[test]
    fn plain_line_for_no_match() {
        let report = evaluate("P 1:1", &config());
        assert!(!report.is_resolved());
        assert_eq!(render_plain(&report), "no match: P 1:1");
    }

    #[test]
    fn explain_adds_reasons_and_stages() {
        let mut cfg = config();
        cfg.explain = true;
        assert_eq!(
            render_plain(&evaluate("P 1:1", &cfg)),
            "no match: P 1:1  (ambiguous: Psalms, Proverbs, Philippians, Philemon)"
        );
        assert_eq!(
            render_plain(&evaluate("Jude 1:26", &cfg)),
            "no match: Jude 1:26  (chapter or verse out of range)"
        );
        assert_eq!(
            render_plain(&evaluate("John 3:16", &cfg)),
            "John 3:16  #JHN3  [seed 1, name_filter skipped, chapter_bounds 1, verse_bounds 1]"
        );
    }

    #[test]
    fn neighbors_are_opt_in() {
        let mut cfg = config();
        cfg.show_neighbors = true;
        cfg.show_route = false;
        let report = evaluate("Malachi 4", &cfg);
        assert_eq!(render_plain(&report), "Malachi 4:1  prev Malachi 3  next Matthew 1");
    }

    #[test]
    fn speech_mode_keeps_whole_chapter_targets() {
        let mut cfg = config();
        cfg.input_mode = InputMode::Speech;
        let report = evaluate("1st Corinthians chapter 13", &cfg);
        assert_eq!(report.display.as_deref(), Some("1 Corinthians 13"));
        assert_eq!(report.route.as_deref(), Some("#1CO13"));
        assert!(!evaluate("John 3:16", &cfg).is_resolved());

        cfg.explain = true;
        let report = evaluate("Jude chapter 1 verse 26", &cfg);
        assert_eq!(
            report.trace.map(|trace| trace.outcome),
            Some(Outcome::OutOfRange)
        );
        assert_eq!(
            render_plain(&evaluate("John 3:16", &cfg)),
            "no match: John 3:16"
        );
    }

    #[test]
    fn json_report_shape() {
        let mut cfg = config();
        cfg.show_neighbors = true;
        let line = render(&evaluate("Genesis 1", &cfg), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["query"], "Genesis 1");
        assert_eq!(json["display"], "Genesis 1:1");
        assert_eq!(json["route"], "#GEN1");
        assert_eq!(json["result"]["kind"], "verse");
        assert_eq!(json["result"]["target"]["book"], 1);
        assert_eq!(json["next"]["chapter"], 2);
        assert!(json.get("previous").is_none());
        assert!(json.get("trace").is_none());
    }

    #[test]
    fn json_trace_for_failures() {
        let mut cfg = config();
        cfg.explain = true;
        let line = render(&evaluate("ohn 3:16", &cfg), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(json["display"].is_null());
        assert_eq!(json["trace"]["outcome"]["kind"], "unrecognized");
    }
}

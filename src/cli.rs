//! Command-line arguments.

use crate::config::{AppConfig, InputMode, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Flags left unset keep the config file value.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "verse-finder")]
#[command(about = "Resolve free-text scripture references", long_about = None)]
pub struct CliArgs {
    /// Treat queries as speech transcripts ("John chapter 3 verse 16").
    #[arg(long, conflicts_with = "text")]
    pub speech: bool,

    /// Treat queries as typed references.
    #[arg(long)]
    pub text: bool,

    /// One JSON object per query.
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,

    #[arg(long)]
    pub plain: bool,

    /// Report every elimination stage and why a query failed.
    #[arg(long)]
    pub explain: bool,

    /// Show the previous and next chapter.
    #[arg(long)]
    pub nav: bool,

    #[arg(long = "config", value_name = "PATH", default_value = "conf/config.toml")]
    pub config_path: PathBuf,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,

    /// Query words; read one query per line from stdin when empty.
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl CliArgs {
    pub fn input_mode(&self) -> Option<InputMode> {
        match (self.speech, self.text) {
            (true, _) => Some(InputMode::Speech),
            (_, true) => Some(InputMode::Text),
            _ => None,
        }
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        match (self.json, self.plain) {
            (true, _) => Some(OutputFormat::Json),
            (_, true) => Some(OutputFormat::Plain),
            _ => None,
        }
    }

    /// Positional words joined with spaces.
    pub fn joined_query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }

    /// Layer the flags over the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.input_mode() {
            config.input_mode = mode;
        }
        if let Some(format) = self.output_format() {
            config.output_format = format;
        }
        if self.explain {
            config.explain = true;
        }
        if self.nav {
            config.show_neighbors = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("verse-finder").chain(list.iter().copied()))
    }

    #[test]
    fn no_arguments_reads_stdin_with_defaults() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.config_path, PathBuf::from("conf/config.toml"));
        assert_eq!(parsed.joined_query(), None);
        assert_eq!(parsed.input_mode(), None);
        assert_eq!(parsed.output_format(), None);
    }

    #[test]
    fn positional_words_form_one_query() {
        let parsed = args(&["1", "Cor", "13:4"]).unwrap();
        assert_eq!(parsed.joined_query().as_deref(), Some("1 Cor 13:4"));
    }

    #[test]
    fn flags_and_config_path() {
        let parsed = args(&[
            "--speech",
            "--json",
            "--explain",
            "--nav",
            "--dump-config",
            "--config",
            "other.toml",
            "John",
            "chapter",
            "3",
        ])
        .unwrap();
        assert_eq!(parsed.input_mode(), Some(InputMode::Speech));
        assert_eq!(parsed.output_format(), Some(OutputFormat::Json));
        assert!(parsed.explain);
        assert!(parsed.nav);
        assert!(parsed.dump_config);
        assert_eq!(parsed.config_path, PathBuf::from("other.toml"));
        assert_eq!(parsed.joined_query().as_deref(), Some("John chapter 3"));
    }

    #[test]
    fn double_dash_ends_flags() {
        let parsed = args(&["--", "--json"]).unwrap();
        assert_eq!(parsed.output_format(), None);
        assert_eq!(parsed.joined_query().as_deref(), Some("--json"));
    }

    #[test]
    fn rejects_unknown_flags_missing_values_and_conflicts() {
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--speech", "--text"]).is_err());
        assert!(args(&["--json", "--plain"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        args(&["--speech", "--nav"]).unwrap().apply(&mut config);
        assert_eq!(config.input_mode, InputMode::Speech);
        assert!(config.show_neighbors);
        assert_eq!(config.output_format, OutputFormat::Plain);
        assert!(!config.explain);

        let mut config = AppConfig {
            output_format: OutputFormat::Json,
            ..AppConfig::default()
        };
        args(&["--plain"]).unwrap().apply(&mut config);
        assert_eq!(config.output_format, OutputFormat::Plain);
    }
}

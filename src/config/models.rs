use serde::Deserialize;

/// Flattened app configuration; the TOML file groups these into tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_input_mode")]
    pub input_mode: InputMode,
    #[serde(default = "crate::config::defaults::default_explain")]
    pub explain: bool,
    #[serde(default = "crate::config::defaults::default_output_format")]
    pub output_format: OutputFormat,
    #[serde(default = "crate::config::defaults::default_show_route")]
    pub show_route: bool,
    #[serde(default = "crate::config::defaults::default_show_neighbors")]
    pub show_neighbors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: crate::config::defaults::default_log_level(),
            input_mode: crate::config::defaults::default_input_mode(),
            explain: crate::config::defaults::default_explain(),
            output_format: crate::config::defaults::default_output_format(),
            show_route: crate::config::defaults::default_show_route(),
            show_neighbors: crate::config::defaults::default_show_neighbors(),
        }
    }
}

/// How query text is interpreted.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    /// Typed references: `John 3:16`, `jn3.16`.
    #[default]
    Text,
    /// Transcribed speech: `John chapter 3 verse 16`.
    Speech,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InputMode::Text => "text",
            InputMode::Speech => "speech",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Plain,
    /// One JSON object per query.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

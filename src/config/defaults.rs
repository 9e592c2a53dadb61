use super::models::{InputMode, LogLevel, OutputFormat};

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

pub(crate) fn default_input_mode() -> InputMode {
    InputMode::Text
}

pub(crate) fn default_explain() -> bool {
    false
}

pub(crate) fn default_output_format() -> OutputFormat {
    OutputFormat::Plain
}

pub(crate) fn default_show_route() -> bool {
    true
}

pub(crate) fn default_show_neighbors() -> bool {
    false
}

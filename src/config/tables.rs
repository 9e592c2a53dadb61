use super::defaults;
use super::models::{AppConfig, InputMode, LogLevel, OutputFormat};
use serde::Deserialize;

/// On-disk layout: `[logging]`, `[resolver]` and `[output]` tables.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    resolver: ResolverConfig,
    #[serde(default)]
    output: OutputConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            log_level: tables.logging.log_level,
            input_mode: tables.resolver.input_mode,
            explain: tables.resolver.explain,
            output_format: tables.output.format,
            show_route: tables.output.show_route,
            show_neighbors: tables.output.show_neighbors,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            resolver: ResolverConfig {
                input_mode: config.input_mode,
                explain: config.explain,
            },
            output: OutputConfig {
                format: config.output_format,
                show_route: config.show_route,
                show_neighbors: config.show_neighbors,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ResolverConfig {
    #[serde(default = "defaults::default_input_mode")]
    input_mode: InputMode,
    #[serde(default = "defaults::default_explain")]
    explain: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            input_mode: defaults::default_input_mode(),
            explain: defaults::default_explain(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct OutputConfig {
    #[serde(default = "defaults::default_output_format")]
    format: OutputFormat,
    #[serde(default = "defaults::default_show_route")]
    show_route: bool,
    #[serde(default = "defaults::default_show_neighbors")]
    show_neighbors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: defaults::default_output_format(),
            show_route: defaults::default_show_route(),
            show_neighbors: defaults::default_show_neighbors(),
        }
    }
}

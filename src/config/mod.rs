//! Configuration loading for the verse finder.
//!
//! Settings live in `conf/config.toml` (or the path given with `--config`).
//! A missing or invalid file falls back to defaults so a lookup always runs.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, serialize_config};
pub use models::{AppConfig, InputMode, OutputFormat};

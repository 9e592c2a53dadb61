//! Entry point for the verse finder.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments with `clap`.
//! - Load user configuration from `conf/config.toml` and layer flags on top.
//! - Resolve each query (from the command line or stdin) and print a report.

mod cli;
mod config;
mod output;

use crate::cli::CliArgs;
use crate::config::{load_config, serialize_config};
use crate::output::{evaluate, render};
use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    match run(&reload_handle) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!("{err:?}");
            std::process::exit(1);
        }
    }
}

/// Returns whether every query resolved.
fn run(reload_handle: &ReloadHandle) -> Result<bool> {
    let args = CliArgs::parse();

    let mut config = load_config(&args.config_path);
    args.apply(&mut config);
    if env::var_os("RUST_LOG").is_none() {
        set_log_level(reload_handle, config.log_level.as_filter_str());
    }
    if args.dump_config {
        print!("{}", serialize_config(&config)?);
        return Ok(true);
    }
    info!(
        mode = %config.input_mode,
        format = %config.output_format,
        explain = config.explain,
        neighbors = config.show_neighbors,
        "Starting verse finder"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_resolved = true;
    let mut handle_query = |query: &str| -> Result<()> {
        let report = evaluate(query, &config);
        all_resolved &= report.is_resolved();
        let line = render(&report, config.output_format)?;
        writeln!(out, "{line}").context("Failed to write result")
    };

    match args.joined_query() {
        Some(query) => handle_query(&query)?,
        None => {
            debug!("Reading queries from stdin");
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read query from stdin")?;
                let query = line.trim();
                if !query.is_empty() {
                    handle_query(query)?;
                }
            }
        }
    }
    Ok(all_resolved)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    debug!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

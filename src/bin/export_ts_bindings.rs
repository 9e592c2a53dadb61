//! Writes the TypeScript bindings for the web front end.
//!
//! Usage: `export_ts_bindings [OUT_DIR]` (defaults to `ui/src/generated`).

use std::env;
use std::path::PathBuf;

const DEFAULT_OUT_DIR: &str = "ui/src/generated";

fn main() {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    match verse_core::export_ts_bindings(&out_dir) {
        Ok(()) => println!("exported TS bindings to {}", out_dir.display()),
        Err(err) => {
            eprintln!("failed to export TS bindings: {err:#}");
            std::process::exit(1);
        }
    }
}

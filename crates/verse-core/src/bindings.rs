//! TypeScript bindings for the result types the web front end consumes.

use crate::canon::{BookId, Testament};
use crate::normalizer::ParsedQuery;
use crate::reference::{ChapterRef, Reference};
use crate::resolver::{Outcome, ResolutionTrace, Seed, Stage, StageReport};
use crate::speech::SpeechTarget;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ts_rs::TS;

/// Exports `T` and its dependencies; returns the exported type name.
fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<String> {
    T::export_all_to(out_dir).with_context(|| format!("Failed to export {}", T::name()))?;
    Ok(T::name())
}

/// Replace every `.ts` file in `out_dir` with freshly generated bindings and
/// an `index.ts` re-exporting them.
pub fn export_ts_bindings(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for entry in
        fs::read_dir(out_dir).with_context(|| format!("Failed to list {}", out_dir.display()))?
    {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    let names = [
        export_single_type::<BookId>(out_dir)?,
        export_single_type::<Testament>(out_dir)?,
        export_single_type::<Reference>(out_dir)?,
        export_single_type::<ChapterRef>(out_dir)?,
        export_single_type::<ParsedQuery>(out_dir)?,
        export_single_type::<Seed>(out_dir)?,
        export_single_type::<Stage>(out_dir)?,
        export_single_type::<StageReport>(out_dir)?,
        export_single_type::<Outcome>(out_dir)?,
        export_single_type::<ResolutionTrace>(out_dir)?,
        export_single_type::<SpeechTarget>(out_dir)?,
    ];

    let index_path = out_dir.join("index.ts");
    fs::write(&index_path, index_module(&names))
        .with_context(|| format!("Failed to write {}", index_path.display()))?;
    tracing::info!(path = %out_dir.display(), "Exported TypeScript bindings");
    Ok(())
}

fn index_module(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("export type {{ {name} }} from \"./{name}\";\n"))
        .collect()
}

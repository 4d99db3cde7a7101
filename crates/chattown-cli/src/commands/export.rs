//! Export command - Write a subset of conversations as a new archive.

use anyhow::{Context, Result};
use chattown_format::{export_to_path, SELECTED_EXPORT_FILENAME, UNSELECTED_EXPORT_FILENAME};
use std::path::Path;

use super::load::load_workspace;

pub fn run(
    archive: &Path,
    ids: Option<&str>,
    all: bool,
    query: Option<&str>,
    unselected: bool,
    output_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut workspace = load_workspace(archive)?;

    // Build the selection. All three sources union together, matching the
    // interactive select-all-visible semantics.
    if let Some(list) = ids {
        for id in list.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            if !workspace.is_selected(id) {
                workspace.toggle(id);
            }
        }
    }
    if let Some(q) = query {
        workspace.set_query(q);
        workspace.select_all_visible();
        workspace.set_query("");
    }
    if all {
        workspace.select_all_visible();
    }

    let subset = if unselected {
        workspace.unselected_conversations()
    } else {
        workspace.selected_conversations()
    };
    let filename = if unselected {
        UNSELECTED_EXPORT_FILENAME
    } else {
        SELECTED_EXPORT_FILENAME
    };

    // Usability guard, not an error: nothing to write means no file.
    if subset.is_empty() {
        println!(
            "Nothing to export: the {} subset is empty.",
            if unselected { "unselected" } else { "selected" }
        );
        return Ok(());
    }

    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    let output_path = dir.join(filename);
    export_to_path(&subset, &output_path)
        .with_context(|| format!("Failed to write: {:?}", output_path))?;

    if json {
        let result = serde_json::json!({
            "output": output_path.to_string_lossy(),
            "conversations": subset.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Exported {} conversation(s) to {:?}",
            subset.len(),
            output_path
        );
    }

    Ok(())
}

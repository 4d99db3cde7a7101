//! Transcript command - Write one conversation as a plain-text file.

use anyhow::{Context, Result};
use chattown_format::{export_filename, render_transcript};
use std::fs;
use std::path::Path;

use super::load::load_workspace;

pub fn run(archive: &Path, id: &str, output_dir: Option<&Path>, json: bool) -> Result<()> {
    let workspace = load_workspace(archive)?;
    let conversation = workspace
        .conversations()
        .iter()
        .find(|c| c.id == id)
        .with_context(|| format!("No conversation with id {:?}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(conversation)?);
        return Ok(());
    }

    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    let output_path = dir.join(export_filename(conversation));
    fs::write(&output_path, render_transcript(conversation))
        .with_context(|| format!("Failed to write: {:?}", output_path))?;

    println!(
        "Wrote transcript ({} message(s)) to {:?}",
        conversation.messages.len(),
        output_path
    );

    Ok(())
}

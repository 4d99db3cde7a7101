//! Shared archive loading for the non-interactive commands.

use anyhow::{Context, Result};
use chattown_format::{Archive, Workspace};
use std::path::Path;

/// Load an archive and wrap it in fresh browsing state.
///
/// Loading is the only fatal step: parse failures and a non-array top level
/// abort the command. Everything after this degrades per-record.
pub fn load_workspace(path: &Path) -> Result<Workspace> {
    let archive = Archive::from_path(path)
        .with_context(|| format!("Failed to read archive: {:?}", path))?;
    Ok(Workspace::from_archive(&archive))
}

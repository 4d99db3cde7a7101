//! Info command - Show archive counters and statistics (non-interactive).

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::load::load_workspace;

#[derive(Serialize)]
struct ArchiveInfo {
    total: usize,
    processed: usize,
    skipped: usize,
    selected: usize,
    messages: usize,
    user_messages: usize,
    assistant_messages: usize,
}

pub fn run(archive: &Path, json: bool) -> Result<()> {
    let workspace = load_workspace(archive)?;
    let counters = workspace.counters();

    let messages: usize = workspace
        .conversations()
        .iter()
        .map(|c| c.messages.len())
        .sum();
    let role_count = |role: &str| -> usize {
        workspace
            .conversations()
            .iter()
            .flat_map(|c| &c.messages)
            .filter(|m| m.author_role == role)
            .count()
    };

    if json {
        let info = ArchiveInfo {
            total: counters.total,
            processed: counters.processed,
            skipped: counters.total - counters.processed,
            selected: counters.selected,
            messages,
            user_messages: role_count("user"),
            assistant_messages: role_count("assistant"),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Records:      {}", counters.total);
        println!("Processed:    {}", counters.processed);
        println!("Skipped:      {}", counters.total - counters.processed);
        println!();
        println!("Messages:     {}", messages);
        println!("  user:       {}", role_count("user"));
        println!("  assistant:  {}", role_count("assistant"));
    }

    Ok(())
}

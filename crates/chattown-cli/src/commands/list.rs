//! List command - List the conversations in an archive (non-interactive).

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::load::load_workspace;

#[derive(Serialize)]
struct ConversationRow {
    id: String,
    summary: String,
    messages: usize,
    created: String,
}

pub fn run(archive: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let workspace = load_workspace(archive)?;
    let conversations = workspace.conversations();

    let limited: Vec<_> = match limit {
        Some(n) => conversations.iter().take(n).collect(),
        None => conversations.iter().collect(),
    };

    if json {
        let rows: Vec<ConversationRow> = limited
            .iter()
            .map(|c| ConversationRow {
                id: c.id.clone(),
                summary: c.summary.clone(),
                messages: c.messages.len(),
                created: format_unix_time(c.create_time),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        if limited.is_empty() {
            println!("No conversations found.");
            return Ok(());
        }

        println!(
            "{:<38} {:<17} {:>5}  SUMMARY",
            "ID", "CREATED", "MSGS"
        );
        println!("{}", "-".repeat(100));

        for c in &limited {
            let summary = truncate_chars(&c.summary, 50);
            println!(
                "{:<38} {:<17} {:>5}  {}",
                truncate_chars(&c.id, 38),
                format_unix_time(c.create_time),
                c.messages.len(),
                summary
            );
        }

        let counters = workspace.counters();
        println!(
            "\n{} of {} record(s) normalized.",
            counters.processed, counters.total
        );
    }

    Ok(())
}

/// Render a unix-seconds timestamp as a local date, `-` when absent.
pub fn format_unix_time(timestamp: Option<f64>) -> String {
    timestamp
        .and_then(|secs| chrono::DateTime::from_timestamp(secs as i64, 0))
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Search command - Search conversations by title, summary, or content
//! (non-interactive).

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::load::load_workspace;

#[derive(Serialize)]
struct SearchResult {
    id: String,
    summary: String,
    messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_content: Option<String>,
}

pub fn run(archive: &Path, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let mut workspace = load_workspace(archive)?;
    workspace.set_query(query);

    let query_lower = query.to_lowercase();
    let max = limit.unwrap_or(20);

    let results: Vec<SearchResult> = workspace
        .displayed()
        .iter()
        .take(max)
        .map(|c| {
            let title_matches = c.title.to_lowercase().contains(&query_lower)
                || c.summary.to_lowercase().contains(&query_lower);
            let matched_content = if title_matches {
                None
            } else {
                c.messages
                    .iter()
                    .find(|m| m.content_text.to_lowercase().contains(&query_lower))
                    .map(|m| snippet_around_match(&m.content_text, &query_lower))
            };
            SearchResult {
                id: c.id.clone(),
                summary: c.summary.clone(),
                messages: c.messages.len(),
                matched_content,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        if results.is_empty() {
            println!("No conversations matching \"{}\".", query);
            return Ok(());
        }

        for r in &results {
            println!("{}  {}", r.id, r.summary);
            if let Some(ref snippet) = r.matched_content {
                println!("     match: {}", snippet);
            }
            println!();
        }

        println!("{} result(s).", results.len());
    }

    Ok(())
}

/// Extract a short snippet around the first match, snapping the cut points
/// to whitespace so multi-byte text is never split mid-character.
fn snippet_around_match(text: &str, query_lower: &str) -> String {
    let lowered = text.to_lowercase();
    let Some(pos) = lowered.find(query_lower) else {
        return String::new();
    };

    let start = pos.saturating_sub(40);
    let end = (pos + query_lower.len() + 40).min(text.len());
    let start = text
        .get(..start)
        .and_then(|head| head.rfind(char::is_whitespace).map(|p| p + 1))
        .unwrap_or(0);
    let end = text
        .get(end..)
        .and_then(|tail| tail.find(char::is_whitespace).map(|p| p + end))
        .unwrap_or(text.len());

    let snippet = text[start..end].replace('\n', " ");
    format!("...{}...", snippet)
}

//! Live browsing state: search query, selection set, and derived views.
//!
//! Everything observable here is a pure recomputation from the normalized
//! list plus the current query/selection. There are no cached views, so the
//! derived values can never drift out of sync with their inputs.

use crate::{Archive, Conversation};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashSet;

/// The user-facing aggregate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Counters {
    /// Raw records in the loaded archive, counted before validation.
    pub total: usize,
    /// Conversations that survived normalization.
    pub processed: usize,
    /// Conversations matching the current query.
    pub displayed: usize,
    /// Size of the selection set. Not intersected with the list: an id
    /// toggled by hand that matches nothing still counts.
    pub selected: usize,
}

/// One loaded archive plus the interactive state layered on top of it.
///
/// A workspace is built from a single [`Archive`]; loading a new archive
/// means building a new workspace, which is what resets query and selection.
#[derive(Debug, Clone)]
pub struct Workspace {
    total_records: usize,
    conversations: Vec<Conversation>,
    query: String,
    selection: HashSet<String>,
}

impl Workspace {
    /// Normalize an archive and wrap it in fresh interactive state.
    pub fn from_archive(archive: &Archive) -> Self {
        Self {
            total_records: archive.total(),
            conversations: archive.normalize(),
            query: String::new(),
            selection: HashSet::new(),
        }
    }

    /// All normalized conversations, in archive order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Indices (into [`Workspace::conversations`]) of the displayed set.
    pub fn displayed_indices(&self) -> Vec<usize> {
        if self.query.is_empty() {
            return (0..self.conversations.len()).collect();
        }
        let needle = self.query.to_lowercase();
        self.conversations
            .iter()
            .enumerate()
            .filter(|(_, conversation)| matches_query(conversation, &needle))
            .map(|(index, _)| index)
            .collect()
    }

    /// Conversations matching the current query; the full list when the
    /// query is empty.
    pub fn displayed(&self) -> Vec<&Conversation> {
        self.displayed_indices()
            .into_iter()
            .map(|index| &self.conversations[index])
            .collect()
    }

    /// Flip membership of `id` in the selection set.
    pub fn toggle(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Add every currently displayed conversation to the selection.
    /// Existing selections outside the visible set are kept.
    pub fn select_all_visible(&mut self) {
        let visible: Vec<String> = self.displayed().iter().map(|c| c.id.clone()).collect();
        self.selection.extend(visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// The selected subset, computed fresh from the current selection.
    pub fn selected_conversations(&self) -> Vec<&Conversation> {
        self.conversations
            .iter()
            .filter(|c| self.selection.contains(&c.id))
            .collect()
    }

    /// The unselected complement, computed fresh from the current selection.
    pub fn unselected_conversations(&self) -> Vec<&Conversation> {
        self.conversations
            .iter()
            .filter(|c| !self.selection.contains(&c.id))
            .collect()
    }

    pub fn counters(&self) -> Counters {
        Counters {
            total: self.total_records,
            processed: self.conversations.len(),
            displayed: self.displayed_indices().len(),
            selected: self.selection.len(),
        }
    }
}

/// Case-insensitive substring match against title, summary, or any message.
fn matches_query(conversation: &Conversation, needle: &str) -> bool {
    conversation.title.to_lowercase().contains(needle)
        || conversation.summary.to_lowercase().contains(needle)
        || conversation
            .messages
            .iter()
            .any(|m| m.content_text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn workspace_with_three() -> Workspace {
        let archive = Archive::from_value(json!([
            {
                "id": "alpha",
                "title": "Rust lifetimes",
                "mapping": {
                    "n1": {"id": "n1", "message": {
                        "id": "m1", "author": {"role": "user"}, "create_time": 1.0,
                        "content": {"content_type": "text", "parts": ["Explain the borrow checker"]},
                        "metadata": {}
                    }, "parent": null, "children": []}
                }
            },
            {
                "id": "beta",
                "title": "Dinner ideas",
                "mapping": {
                    "n1": {"id": "n1", "message": {
                        "id": "m2", "author": {"role": "user"}, "create_time": 1.0,
                        "content": {"content_type": "text", "parts": ["Something with mushrooms"]},
                        "metadata": {}
                    }, "parent": null, "children": []}
                }
            },
            {"title": "dropped, no id"},
            {
                "id": "gamma",
                "title": "New Chat",
                "mapping": {
                    "n1": {"id": "n1", "message": {
                        "id": "m3", "author": {"role": "user"}, "create_time": 1.0,
                        "content": {"content_type": "text", "parts": ["Rust question about tokio"]},
                        "metadata": {}
                    }, "parent": null, "children": []}
                }
            }
        ]))
        .unwrap();
        Workspace::from_archive(&archive)
    }

    #[test]
    fn test_empty_query_displays_everything() {
        let workspace = workspace_with_three();
        assert_eq!(workspace.displayed().len(), 3);
    }

    #[test]
    fn test_query_matches_title_summary_and_content() {
        let mut workspace = workspace_with_three();

        // "rust" hits alpha's title and gamma's message content.
        workspace.set_query("RUST");
        let ids: Vec<&str> = workspace.displayed().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "gamma"]);

        // "mushroom" only lives in beta's message text (and thus its summary).
        workspace.set_query("mushroom");
        let ids: Vec<&str> = workspace.displayed().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["beta"]);
    }

    #[test]
    fn test_displayed_shrinks_as_query_grows() {
        let mut workspace = workspace_with_three();
        let mut previous = workspace.displayed().len();
        for query in ["r", "ru", "rus", "rust", "rust l", "rust lifetimes x"] {
            workspace.set_query(query);
            let current = workspace.displayed().len();
            assert!(current <= previous, "query {:?} grew the displayed set", query);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut workspace = workspace_with_three();
        workspace.toggle("alpha");
        assert!(workspace.is_selected("alpha"));
        workspace.toggle("alpha");
        assert!(!workspace.is_selected("alpha"));
        assert_eq!(workspace.counters().selected, 0);
    }

    #[test]
    fn test_select_all_visible_is_a_union() {
        let mut workspace = workspace_with_three();
        workspace.toggle("beta");

        workspace.set_query("rust");
        workspace.select_all_visible();

        // beta stays selected even though it is not visible.
        assert!(workspace.is_selected("alpha"));
        assert!(workspace.is_selected("beta"));
        assert!(workspace.is_selected("gamma"));
        assert_eq!(workspace.counters().selected, 3);
    }

    #[test]
    fn test_clear_selection() {
        let mut workspace = workspace_with_three();
        workspace.toggle("alpha");
        workspace.toggle("beta");
        workspace.clear_selection();
        assert_eq!(workspace.counters().selected, 0);
        assert_eq!(workspace.unselected_conversations().len(), 3);
    }

    #[test]
    fn test_subsets_partition_the_list() {
        let mut workspace = workspace_with_three();
        workspace.toggle("alpha");
        workspace.toggle("gamma");

        let selected: Vec<&str> = workspace
            .selected_conversations()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        let unselected: Vec<&str> = workspace
            .unselected_conversations()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(selected, vec!["alpha", "gamma"]);
        assert_eq!(unselected, vec!["beta"]);
    }

    #[test]
    fn test_counters_track_stale_selection_ids() {
        let mut workspace = workspace_with_three();
        workspace.toggle("no-such-conversation");

        let counters = workspace.counters();
        assert_eq!(counters.total, 4);
        assert_eq!(counters.processed, 3);
        assert_eq!(counters.displayed, 3);
        // The stale id still counts; the subsets simply don't contain it.
        assert_eq!(counters.selected, 1);
        assert!(workspace.selected_conversations().is_empty());
    }
}

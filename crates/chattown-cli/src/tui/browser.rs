//! Browser view - Interactive conversation list with selection and export.

use chattown_format::{
    export_filename, export_to_path, render_transcript, Conversation, Workspace,
    SELECTED_EXPORT_FILENAME, UNSELECTED_EXPORT_FILENAME,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::fs;
use std::time::{Duration, Instant};

use super::common::{format_short_time, role_style, truncate_str};

/// Action returned by the browser to the top-level app loop.
pub enum BrowserAction {
    /// Quit the application.
    Quit,
    /// No action; continue rendering.
    None,
}

/// Input mode.
#[derive(PartialEq)]
enum Mode {
    Normal,
    Search,
}

/// Browser view state.
pub struct BrowserState {
    workspace: Workspace,
    filtered_indices: Vec<usize>,
    cursor: usize,
    preview_scroll: usize,
    mode: Mode,
    search_input: String,
    status_message: Option<(String, Instant)>,
}

impl BrowserState {
    pub fn new(workspace: Workspace) -> Self {
        let filtered_indices = workspace.displayed_indices();
        BrowserState {
            workspace,
            filtered_indices,
            cursor: 0,
            preview_scroll: 0,
            mode: Mode::Normal,
            search_input: String::new(),
            status_message: None,
        }
    }

    fn highlighted(&self) -> Option<&Conversation> {
        self.filtered_indices
            .get(self.cursor)
            .map(|&i| &self.workspace.conversations()[i])
    }

    fn move_down(&mut self) {
        if !self.filtered_indices.is_empty() && self.cursor < self.filtered_indices.len() - 1 {
            self.cursor += 1;
            self.preview_scroll = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.preview_scroll = 0;
        }
    }

    fn jump_top(&mut self) {
        self.cursor = 0;
        self.preview_scroll = 0;
    }

    fn jump_bottom(&mut self) {
        if !self.filtered_indices.is_empty() {
            self.cursor = self.filtered_indices.len() - 1;
            self.preview_scroll = 0;
        }
    }

    fn update_filter(&mut self) {
        self.workspace.set_query(&self.search_input);
        self.filtered_indices = self.workspace.displayed_indices();

        if self.filtered_indices.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.filtered_indices.len() {
            self.cursor = self.filtered_indices.len() - 1;
        }
        self.preview_scroll = 0;
    }

    fn toggle_highlighted(&mut self) {
        if let Some(id) = self.highlighted().map(|c| c.id.clone()) {
            self.workspace.toggle(&id);
        }
    }

    fn export_subset(&mut self, unselected: bool) {
        let message = {
            let subset = if unselected {
                self.workspace.unselected_conversations()
            } else {
                self.workspace.selected_conversations()
            };
            if subset.is_empty() {
                format!(
                    "Nothing to export: the {} subset is empty",
                    if unselected { "unselected" } else { "selected" }
                )
            } else {
                let filename = if unselected {
                    UNSELECTED_EXPORT_FILENAME
                } else {
                    SELECTED_EXPORT_FILENAME
                };
                match export_to_path(&subset, filename) {
                    Ok(()) => {
                        format!("Exported {} conversation(s) to {}", subset.len(), filename)
                    }
                    Err(e) => format!("Export failed: {}", e),
                }
            }
        };
        self.set_status(message);
    }

    fn export_transcript(&mut self) {
        let message = match self.highlighted() {
            Some(conversation) => {
                let filename = export_filename(conversation);
                match fs::write(&filename, render_transcript(conversation)) {
                    Ok(()) => format!("Wrote transcript to {}", filename),
                    Err(e) => format!("Transcript failed: {}", e),
                }
            }
            None => "No conversation highlighted".to_string(),
        };
        self.set_status(message);
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    fn tick_status(&mut self) {
        if let Some((_, ref t)) = self.status_message {
            if t.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
            }
        }
    }

    /// Handle a key event and return an action.
    pub fn handle_key(&mut self, key: KeyEvent) -> BrowserAction {
        if key.kind != KeyEventKind::Press {
            return BrowserAction::None;
        }

        match self.mode {
            Mode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    return BrowserAction::Quit;
                }
                KeyCode::Char('j') | KeyCode::Down => self.move_down(),
                KeyCode::Char('k') | KeyCode::Up => self.move_up(),
                KeyCode::Char('g') | KeyCode::Home => self.jump_top(),
                KeyCode::Char('G') | KeyCode::End => self.jump_bottom(),
                KeyCode::Char('/') => {
                    self.mode = Mode::Search;
                }
                KeyCode::Char(' ') => self.toggle_highlighted(),
                KeyCode::Char('a') => self.workspace.select_all_visible(),
                KeyCode::Char('c') => self.workspace.clear_selection(),
                KeyCode::Char('s') => self.export_subset(false),
                KeyCode::Char('u') => self.export_subset(true),
                KeyCode::Char('t') => self.export_transcript(),
                KeyCode::PageDown | KeyCode::Char('l') => {
                    self.preview_scroll = self.preview_scroll.saturating_add(10);
                }
                KeyCode::PageUp | KeyCode::Char('h') => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(10);
                }
                _ => {}
            },
            Mode::Search => match key.code {
                KeyCode::Esc => {
                    self.mode = Mode::Normal;
                    self.search_input.clear();
                    self.update_filter();
                }
                KeyCode::Enter => {
                    self.mode = Mode::Normal;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    self.update_filter();
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                    self.update_filter();
                }
                _ => {}
            },
        }

        BrowserAction::None
    }

    /// Called before rendering to expire stale status messages.
    pub fn tick(&mut self) {
        self.tick_status();
    }

    /// Render the browser view.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(f.area());

        let main_area = chunks[0];
        let status_area = chunks[1];

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_area);

        self.draw_conversation_list(f, main_chunks[0]);
        self.draw_preview(f, main_chunks[1]);
        self.draw_status_bar(f, status_area);
    }

    fn draw_conversation_list(&self, f: &mut Frame, area: Rect) {
        let count = self.filtered_indices.len();
        let title = if self.search_input.is_empty() {
            format!(" Conversations ({}) ", count)
        } else {
            format!(" Conversations ({}) [/{}] ", count, self.search_input)
        };

        let items: Vec<ListItem> = self
            .filtered_indices
            .iter()
            .enumerate()
            .map(|(i, &conversation_idx)| {
                let conversation = &self.workspace.conversations()[conversation_idx];
                let date = format_short_time(conversation.create_time);
                let is_highlighted = i == self.cursor;
                let marker = if self.workspace.is_selected(&conversation.id) {
                    "[x] "
                } else {
                    "[ ] "
                };

                let max_summary_len =
                    (area.width as usize).saturating_sub(marker.len() + date.len() + 6);
                let display_summary = truncate_str(&conversation.summary, max_summary_len);

                let line = Line::from(vec![
                    Span::styled(
                        if is_highlighted { "> " } else { "  " },
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        marker,
                        if self.workspace.is_selected(&conversation.id) {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::DarkGray)
                        },
                    ),
                    Span::styled(
                        display_summary.to_string(),
                        if is_highlighted {
                            Style::default().add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        },
                    ),
                    Span::raw(" "),
                    Span::styled(date, Style::default().fg(Color::DarkGray)),
                ]);

                ListItem::new(line)
            })
            .collect();

        let block = Block::default().borders(Borders::ALL).title(title);

        if items.is_empty() {
            let empty_msg = if self.workspace.conversations().is_empty() {
                "No conversations in this archive."
            } else {
                "No matching conversations."
            };
            let paragraph = Paragraph::new(empty_msg)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, area);
        } else {
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray));
            f.render_widget(list, area);
        }
    }

    fn draw_preview(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Messages ");

        let Some(conversation) = self.highlighted() else {
            let paragraph = Paragraph::new("No conversation selected")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(Span::styled(
            conversation.summary.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "  {} message(s), created {}",
                conversation.messages.len(),
                format_short_time(conversation.create_time)
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));

        for message in &conversation.messages {
            lines.push(Line::from(Span::styled(
                message.author_role.to_uppercase(),
                role_style(&message.author_role),
            )));
            let preview_lines: Vec<&str> = message.content_text.lines().take(4).collect();
            for line in preview_lines {
                let truncated = truncate_str(line, (area.width as usize).saturating_sub(4));
                lines.push(Line::from(format!("  {}", truncated)));
            }
            if message.content_text.lines().count() > 4 {
                lines.push(Line::from(Span::styled(
                    "  ...",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.preview_scroll as u16, 0));

        f.render_widget(paragraph, area);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let counters = self.workspace.counters();
        let counter_text = format!(
            "total {}  processed {}  displayed {}  selected {}",
            counters.total, counters.processed, counters.displayed, counters.selected
        );

        let (left_text, style) = if let Some((ref msg, _)) = self.status_message {
            (msg.clone(), Style::default().fg(Color::Green))
        } else if self.mode == Mode::Search {
            (
                format!(
                    "Search: {}_ | Esc: cancel  Enter: confirm",
                    self.search_input
                ),
                Style::default().fg(Color::Yellow),
            )
        } else {
            (
                format!(
                    "{} | Space: select  a: all visible  c: clear  s/u: export  t: transcript  /: search  q: quit",
                    counter_text
                ),
                Style::default().fg(Color::DarkGray),
            )
        };

        let bar = Paragraph::new(left_text).style(style);
        f.render_widget(bar, area);
    }
}

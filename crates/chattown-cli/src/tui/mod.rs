//! Interactive archive browser.
//!
//! A single view: the conversation list with live search, per-conversation
//! selection, a message preview pane, and export actions. The terminal is
//! owned here; the browsing state lives in [`browser`].

pub mod browser;
pub mod common;

use anyhow::{Context, Result};
use chattown_format::{Archive, Workspace};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::Path;
use std::time::Duration;

use browser::{BrowserAction, BrowserState};

/// Run the TUI application against one archive.
pub fn run_tui(path: &Path) -> Result<()> {
    let archive = Archive::from_path(path)
        .with_context(|| format!("Failed to read archive: {:?}", path))?;
    let workspace = Workspace::from_archive(&archive);
    if workspace.conversations().is_empty() {
        println!("Archive has no conversations.");
        return Ok(());
    }
    let mut browser = BrowserState::new(workspace);

    // Set up terminal (once)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Install panic hook so we restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_app_loop(&mut terminal, &mut browser);

    // Restore terminal (once)
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &mut BrowserState,
) -> Result<()> {
    loop {
        browser.tick();
        terminal.draw(|f| browser.draw(f))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match browser.handle_key(key) {
                    BrowserAction::Quit => break,
                    BrowserAction::None => {}
                }
            }
        }
    }

    Ok(())
}

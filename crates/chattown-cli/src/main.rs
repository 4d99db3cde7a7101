//! ChatTown CLI - Browse, filter, and re-export chat conversation archives.
//!
//! Two modes of operation:
//! - **Interactive (TUI)**: `chattown <archive.json>` opens the browser with
//!   live search, per-conversation selection, and export actions
//! - **CLI**: Subcommands like `list`, `info`, `search`, `export` output to
//!   stdout for scripting

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod tui;

#[derive(Parser)]
#[command(name = "chattown")]
#[command(author, version, about = "Browse, filter, and re-export chat conversation archives", long_about = None)]
struct Cli {
    /// Path to an archive to open in the interactive browser
    archive: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the conversations in an archive
    List {
        /// Path to the archive (a .json export)
        archive: PathBuf,

        /// Maximum number of conversations to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON (for machine consumption)
        #[arg(long)]
        json: bool,
    },

    /// Show archive counters and statistics
    Info {
        /// Path to the archive (a .json export)
        archive: PathBuf,

        /// Output as JSON (for machine consumption)
        #[arg(long)]
        json: bool,
    },

    /// Search conversations by title, summary, or message content
    Search {
        /// Path to the archive (a .json export)
        archive: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value = "20")]
        limit: Option<usize>,

        /// Output as JSON (for machine consumption)
        #[arg(long)]
        json: bool,
    },

    /// Export a subset of conversations as a new archive
    Export {
        /// Path to the archive (a .json export)
        archive: PathBuf,

        /// Comma-separated conversation IDs to select
        #[arg(long)]
        ids: Option<String>,

        /// Select every conversation
        #[arg(long)]
        all: bool,

        /// Select every conversation matching a query
        #[arg(long)]
        query: Option<String>,

        /// Export the unselected complement instead of the selection
        #[arg(long)]
        unselected: bool,

        /// Directory to write the export into (defaults to the current dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output as JSON (for machine consumption)
        #[arg(long)]
        json: bool,
    },

    /// Write a single conversation as a plain-text transcript
    Transcript {
        /// Path to the archive (a .json export)
        archive: PathBuf,

        /// ID of the conversation to export
        id: String,

        /// Directory to write the transcript into (defaults to the current dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the normalized conversation as JSON instead of writing a file
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List {
            archive,
            limit,
            json,
        }) => commands::list::run(&archive, limit, json),
        Some(Commands::Info { archive, json }) => commands::info::run(&archive, json),
        Some(Commands::Search {
            archive,
            query,
            limit,
            json,
        }) => commands::search::run(&archive, &query, limit, json),
        Some(Commands::Export {
            archive,
            ids,
            all,
            query,
            unselected,
            output_dir,
            json,
        }) => commands::export::run(
            &archive,
            ids.as_deref(),
            all,
            query.as_deref(),
            unselected,
            output_dir.as_deref(),
            json,
        ),
        Some(Commands::Transcript {
            archive,
            id,
            output_dir,
            json,
        }) => commands::transcript::run(&archive, &id, output_dir.as_deref(), json),
        None => match cli.archive {
            // chattown <path> → open the interactive browser
            Some(path) => tui::run_tui(&path),
            None => anyhow::bail!(
                "No archive given. Pass a path to browse interactively, or see --help for subcommands."
            ),
        },
    }
}

//! Non-interactive subcommands.

pub mod export;
pub mod info;
pub mod list;
pub mod load;
pub mod search;
pub mod transcript;

//! Library module for the seedb binary.
//!
//! Argument parsing and prompts live here so they can be tested; the run
//! itself is driven from main.rs.

pub mod cli;
pub mod prompt;
pub mod theme;

pub use cli::{Cli, Command, GlobalArgs, SeedArgs, resolve_selection, selected_relations};

// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, RenderArgs};
pub use handlers::{handle_check, handle_query, handle_render, handle_scan};

//! CLI module for the study timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `interactive`: Line-driven session over the timer engine

pub mod commands;
pub mod display;
pub mod interactive;

pub use commands::{parse_line, Cli, Commands, InteractiveCommand, RunArgs};
pub use display::Display;
pub use interactive::InteractiveSession;

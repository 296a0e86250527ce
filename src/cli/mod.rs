//! CLI module for the stage timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::{AddArgs, Cli, Commands, RemoveArgs, RunArgs};
pub use display::Display;

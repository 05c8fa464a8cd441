//! CLI module for the timer.
//!
//! This module provides the command-line front end:
//! - `commands`: Command definitions using clap derive
//! - `config`: Session settings resolved from arguments
//! - `display`: Output formatting and display logic
//! - `session`: The interactive loop driving the timer

pub mod commands;
pub mod config;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use config::{OutputFormat, SessionConfig};
pub use display::Display;
pub use session::{run_session, Intent};

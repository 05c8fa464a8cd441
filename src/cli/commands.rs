//! Command definitions for the timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sound::{find_sound_file, SoundSource};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Ring - a work/break countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-ring",
    version,
    about = "Work/break countdown timer for the terminal",
    long_about = "A single-screen countdown timer with a 25 minute work mode and a \
                  5 minute break mode.\nType commands on stdin while it runs \
                  (s = start/pause, r = reset, w = work, b = break, q = quit).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Disable the completion alert sound
    #[arg(long, conflicts_with = "sound")]
    pub no_sound: bool,

    /// Sound file to play on completion (wav, mp3, flac, ogg)
    #[arg(long, value_name = "FILE", value_parser = validate_sound_file)]
    pub sound: Option<PathBuf>,

    /// Print one JSON object per update instead of the text display
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the alert sound path.
///
/// - Must have a supported extension
/// - Must point to an existing file
fn validate_sound_file(s: &str) -> Result<PathBuf, String> {
    match find_sound_file(s) {
        Ok(SoundSource::File { path, .. }) => Ok(path),
        Ok(SoundSource::Tone { .. }) => Err(format!("'{}' is not a sound file", s)),
        Err(e) => Err(e.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

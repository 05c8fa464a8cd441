//! Display utilities for the timer CLI.
//!
//! This module provides formatted output for:
//! - The status line (mode, readout, progress bar, run state)
//! - JSON snapshots for scripting
//! - Completion, help and error messages

use anyhow::{Context, Result};

use crate::types::{TimerMode, TimerView};

use super::config::OutputFormat;

/// Number of cells in the text progress bar.
const BAR_WIDTH: usize = 30;

// ============================================================================
// Display
// ============================================================================

/// Writes timer updates to stdout in the configured format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Display {
    output: OutputFormat,
}

impl Display {
    /// Creates a display for the given output format.
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    /// Renders a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized to JSON.
    pub fn render(&self, view: &TimerView) -> Result<()> {
        match self.output {
            OutputFormat::Text => println!("{}", Self::status_line(view)),
            OutputFormat::Json => println!("{}", Self::json_line(view)?),
        }
        Ok(())
    }

    /// Shows the completion message (text mode only).
    pub fn show_completed(&self, mode: TimerMode) {
        if self.output == OutputFormat::Text {
            println!("* {} complete!", mode.label());
        }
    }

    /// Shows the list of interactive commands.
    pub fn show_help(&self) {
        if self.output == OutputFormat::Text {
            println!("Commands:");
            println!("  s, toggle   start or pause");
            println!("  r, reset    reset the current mode");
            println!("  w, work     switch to work (25 min)");
            println!("  b, break    switch to break (5 min)");
            println!("  h, help     show this help");
            println!("  q, quit     exit");
        }
    }

    /// Reports an unrecognized input line.
    pub fn show_unknown(&self, input: &str) {
        eprintln!("unknown command '{}' (type 'h' for help)", input.trim());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Builds the text status line for a snapshot.
    pub fn status_line(view: &TimerView) -> String {
        let state = if view.is_running {
            "> running"
        } else if view.remaining_seconds == 0 {
            "* done"
        } else {
            "|| paused"
        };

        format!(
            "{:<5} | {:<10} {}  [{}] {:>3}%  {}  ({} min left)",
            view.mode.label(),
            view.mode.caption(),
            view.formatted_time(),
            Self::progress_bar(view.progress_fraction, BAR_WIDTH),
            Self::percent(view.progress_fraction),
            state,
            view.remaining_minutes(),
        )
    }

    /// Serializes a snapshot as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_line(view: &TimerView) -> Result<String> {
        serde_json::to_string(view).context("Failed to serialize timer view")
    }

    /// Draws `fraction` of `width` cells as filled.
    fn progress_bar(fraction: f64, width: usize) -> String {
        let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }

    /// Returns the fraction as a whole percentage.
    fn percent(fraction: f64) -> u32 {
        (fraction.clamp(0.0, 1.0) * 100.0).floor() as u32
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Core data types for the timer.
//!
//! This module defines:
//! - Timer modes and their preset durations
//! - The mutable timer state and its transition table
//! - Derived values (status, progress fraction, ring offset, readouts)
//! - The read-only view handed to the presentation layer

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Work session length in seconds (25 minutes).
pub const WORK_SECONDS: u32 = 25 * 60;

/// Break session length in seconds (5 minutes).
pub const BREAK_SECONDS: u32 = 5 * 60;

/// Radius of the circular progress indicator.
pub const RING_RADIUS: f64 = 140.0;

// ============================================================================
// TimerMode
// ============================================================================

/// The two timer modes, each with a fixed preset duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work session
    #[default]
    Work,
    /// Short break
    Break,
}

impl TimerMode {
    /// Returns the preset duration of this mode in seconds.
    pub fn total_seconds(&self) -> u32 {
        match self {
            TimerMode::Work => WORK_SECONDS,
            TimerMode::Break => BREAK_SECONDS,
        }
    }

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::Break => "break",
        }
    }

    /// Returns the button label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::Break => "Break",
        }
    }

    /// Returns the caption shown under the digit readout.
    pub fn caption(&self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::Break => "Break Time",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timer mode '{0}' (expected 'work' or 'break')")]
pub struct ParseModeError(pub String);

impl FromStr for TimerMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(TimerMode::Work),
            "break" => Ok(TimerMode::Break),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Coarse state of the countdown, derived from [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Not counting down, time left
    Idle,
    /// Counting down
    Running,
    /// Countdown reached zero
    Finished,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Finished => "finished",
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Ignored,
    /// One second elapsed, time is left
    Advanced,
    /// One second elapsed and the countdown reached zero
    Completed,
}

/// The only mutable timer state.
///
/// Every method is a total transition; there are no invalid inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current mode
    pub mode: TimerMode,
    /// Seconds left in the current mode
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking
    pub is_running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Creates the session start state: Work, full duration, not running.
    pub fn new() -> Self {
        Self::for_mode(TimerMode::Work)
    }

    /// Creates an idle state with the full duration of `mode`.
    pub fn for_mode(mode: TimerMode) -> Self {
        Self {
            mode,
            remaining_seconds: mode.total_seconds(),
            is_running: false,
        }
    }

    /// Returns the preset duration of the current mode.
    pub fn total_seconds(&self) -> u32 {
        self.mode.total_seconds()
    }

    /// Switches mode. Always a full reset, even for the current mode.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.is_running = false;
        self.remaining_seconds = mode.total_seconds();
    }

    /// Stops the countdown and restores the current mode's full duration.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = self.mode.total_seconds();
    }

    /// Flips the running flag.
    ///
    /// A finished countdown cannot be started again; it stays stopped until
    /// reset or a mode switch.
    pub fn toggle_run(&mut self) {
        if self.is_running {
            self.is_running = false;
        } else if self.remaining_seconds > 0 {
            self.is_running = true;
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running || self.remaining_seconds == 0 {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.is_running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        }
    }

    /// Returns the derived countdown status.
    pub fn status(&self) -> TimerStatus {
        if self.remaining_seconds == 0 {
            TimerStatus::Finished
        } else if self.is_running {
            TimerStatus::Running
        } else {
            TimerStatus::Idle
        }
    }

    /// Returns the elapsed fraction of the current mode.
    pub fn progress_fraction(&self) -> f64 {
        progress(self.mode, self.remaining_seconds)
    }

    /// Returns the remaining time rounded up to whole minutes.
    pub fn remaining_minutes(&self) -> u32 {
        self.remaining_seconds.div_ceil(60)
    }

    /// Returns a read-only snapshot for the presentation layer.
    pub fn view(&self) -> TimerView {
        TimerView {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            is_running: self.is_running,
            progress_fraction: self.progress_fraction(),
        }
    }
}

// ============================================================================
// TimerView
// ============================================================================

/// Read-only snapshot of the timer for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    /// Current mode
    pub mode: TimerMode,
    /// Seconds left
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking
    pub is_running: bool,
    /// Elapsed fraction in [0, 1]
    pub progress_fraction: f64,
}

impl TimerView {
    /// Returns the `MM:SS` readout.
    pub fn formatted_time(&self) -> String {
        format_time(self.remaining_seconds)
    }

    /// Returns the remaining time rounded up to whole minutes.
    pub fn remaining_minutes(&self) -> u32 {
        self.remaining_seconds.div_ceil(60)
    }

    /// Returns the stroke offset of the progress ring.
    pub fn ring_offset(&self) -> f64 {
        ring_dash_offset(self.progress_fraction, RING_RADIUS)
    }
}

// ============================================================================
// Derived values
// ============================================================================

/// Returns the elapsed fraction of `mode` given `remaining` seconds.
///
/// Pure function of its inputs; `remaining` above the mode's total clamps to 0.
pub fn progress(mode: TimerMode, remaining: u32) -> f64 {
    let total = mode.total_seconds();
    let remaining = remaining.min(total);
    f64::from(total - remaining) / f64::from(total)
}

/// Formats seconds as zero-padded `MM:SS`. Minutes are not capped at 59.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Returns the circumference of a ring with the given radius.
pub fn ring_circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Returns the dash offset that leaves `fraction` of the ring drawn.
pub fn ring_dash_offset(fraction: f64, radius: f64) -> f64 {
    ring_circumference(radius) * (1.0 - fraction.clamp(0.0, 1.0))
}

// ============================================================================
// Tests
// ============================================================================

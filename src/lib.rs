//! Pomodoro Ring Library
//!
//! This library provides the core functionality for the work/break timer.
//! It includes:
//! - Timer state, preset durations and derived progress values
//! - Timer engine with an explicit transition table
//! - A real-time driver that owns the single tick task
//! - Best-effort completion alerts through rodio
//! - CLI command parsing, display and the interactive session

pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_time, progress, TickOutcome, TimerMode, TimerState, TimerStatus, TimerView,
};

pub use engine::{CompletionNotifier, TimerDriver, TimerEngine, TimerEvent};

pub use sound::{AudioWorker, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};

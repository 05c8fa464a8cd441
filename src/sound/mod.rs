//! Sound playback for the completion alert.
//!
//! This module provides:
//!
//! - The [`SoundPlayer`] abstraction the timer talks to
//! - A rodio-backed player for real output
//! - An audio worker thread that makes the rodio player usable from async code
//! - A mock player for tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  crossbeam   ┌──────────────────┐
//! │   AudioWorker    │─────────────▶│ RodioSoundPlayer │
//! │ (Send + Sync)    │   requests   │ (worker thread)  │
//! └──────────────────┘              └────────┬─────────┘
//!                                            │
//!                                  ┌─────────┴─────────┐
//!                                  ▼                   ▼
//!                            Sound file         Synthesized tone
//!                                               (fallback/default)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_ring::sound::{AudioWorker, SoundPlayer, SoundSource};
//!
//! let worker = AudioWorker::spawn().expect("audio init");
//! worker.play(&SoundSource::default_chime()).expect("enqueue failed");
//! ```

mod error;
mod player;
mod source;
mod worker;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::RodioSoundPlayer;
pub use source::{
    find_sound_file, has_supported_extension, SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS,
    SUPPORTED_EXTENSIONS,
};
pub use worker::{spawn_worker_blocking, try_spawn_worker, AudioWorker};

/// Trait for sound playback implementations.
///
/// Implementations must not block: `play` starts or enqueues playback and
/// returns.
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot be started.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }
}

/// Mock sound player for testing.
///
/// Records every successful play and counts every attempt, including the
/// ones it was told to fail.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    attempts: AtomicUsize,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
        self.attempts.store(0, Ordering::SeqCst);
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

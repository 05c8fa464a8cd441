//! Completion alert.
//!
//! The notifier is the only fallible effect in the engine. Failures are
//! logged at debug level and dropped; they never reach the caller.

use std::sync::Arc;

use tracing::debug;

use crate::sound::{SoundPlayer, SoundSource};

/// Shared handle to a thread-safe sound player.
pub type SharedSoundPlayer = Arc<dyn SoundPlayer + Send + Sync>;

/// Fires one best-effort alert per countdown completion.
pub struct CompletionNotifier {
    player: Option<SharedSoundPlayer>,
    source: SoundSource,
    trigger_count: u64,
}

impl CompletionNotifier {
    /// Creates a notifier that plays `source` through `player`.
    pub fn new(player: SharedSoundPlayer, source: SoundSource) -> Self {
        Self {
            player: Some(player),
            source,
            trigger_count: 0,
        }
    }

    /// Creates a notifier without audio output.
    pub fn silent() -> Self {
        Self {
            player: None,
            source: SoundSource::default_chime(),
            trigger_count: 0,
        }
    }

    /// Triggers the alert. Never fails and never blocks.
    pub fn notify(&mut self) {
        self.trigger_count += 1;

        let Some(player) = &self.player else {
            debug!("Countdown completed (silent)");
            return;
        };

        if let Err(e) = player.play(&self.source) {
            debug!("Completion alert failed, ignoring: {}", e);
        }
    }

    /// Returns how many times the alert has been triggered.
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Returns true if this notifier has no audio output.
    pub fn is_silent(&self) -> bool {
        self.player.is_none()
    }

    /// Returns the sound played on completion.
    pub fn source(&self) -> &SoundSource {
        &self.source
    }
}

impl std::fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("silent", &self.is_silent())
            .field("source", &self.source)
            .field("trigger_count", &self.trigger_count)
            .finish()
    }
}

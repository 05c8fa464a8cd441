//! Sound system error types.
//!
//! Every variant is recoverable from the timer's point of view: the
//! completion alert is best effort and its failures are discarded.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Sound file has an extension we cannot decode.
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The audio worker thread has exited.
    #[error("audio worker is not running")]
    WorkerUnavailable,

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotAvailable(_) | Self::StreamError(_) | Self::WorkerUnavailable
        )
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::DecodeError(_)
        )
    }

    /// Returns true if playback should fall back to the synthesized tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        self.is_file_error()
    }
}

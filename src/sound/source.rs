//! Sound source management.
//!
//! The completion alert is either a synthesized tone (the default chime)
//! or a user-supplied sound file.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Frequency of the default chime in hertz.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Length of the default chime in milliseconds.
pub const DEFAULT_TONE_MS: u64 = 600;

/// Supported audio file extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sine tone synthesized at playback time.
    Tone {
        /// Tone frequency in hertz.
        frequency_hz: u32,
        /// Tone length in milliseconds.
        duration_ms: u64,
    },
    /// A sound file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the sound file.
        path: PathBuf,
    },
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::default_chime()
    }
}

impl SoundSource {
    /// Creates a tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns the default completion chime.
    #[must_use]
    pub fn default_chime() -> Self {
        Self::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
    }

    /// Creates a file source without checking the path.
    ///
    /// Use [`find_sound_file`] to validate the path first.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tone { .. } => "tone",
            Self::File { name, .. } => name,
        }
    }

    /// Returns true if this is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

/// Returns true if the path has a supported audio extension.
#[must_use]
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Validates a user-supplied sound file and wraps it in a [`SoundSource`].
///
/// # Errors
///
/// Returns `SoundError::UnsupportedFormat` for unknown extensions and
/// `SoundError::FileNotFound` if the file does not exist.
pub fn find_sound_file(path: impl AsRef<Path>) -> Result<SoundSource, SoundError> {
    let path = path.as_ref();

    if !has_supported_extension(path) {
        return Err(SoundError::UnsupportedFormat(format!(
            "{} (supported: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }

    Ok(SoundSource::file(path))
}

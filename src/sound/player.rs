//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` owns the audio output stream, which is not `Send`;
//! see [`super::worker`] for the thread that hosts it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

/// Gain applied to synthesized tones.
const TONE_VOLUME: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sounds continue in the background for as long
/// as the player is alive.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to the default chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be created or the
    /// fallback tone cannot be played.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { name, path } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Err(e) if e.should_fallback_to_tone() => {
                        warn!("Failed to play '{}': {}, falling back to tone", name, e);
                        self.play_default_tone()
                    }
                    result => result,
                }
            }
            SoundSource::Tone {
                frequency_hz,
                duration_ms,
            } => {
                debug!("Playing tone: {} Hz for {} ms", frequency_hz, duration_ms);
                self.play_tone(*frequency_hz, *duration_ms)
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!("Sound file playback started (detached)");
        Ok(())
    }

    fn play_default_tone(&self) -> Result<(), SoundError> {
        self.play_tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
    }

    fn play_tone(&self, frequency_hz: u32, duration_ms: u64) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(Duration::from_millis(duration_ms))
            .amplify(TONE_VOLUME);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();

        debug!("Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Always true: the stream is opened during construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

//! Session configuration resolved from command-line arguments.

use crate::sound::SoundSource;

use super::commands::RunArgs;

/// How updates are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable status line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Whether the completion alert makes a sound
    pub sound_enabled: bool,
    /// Sound played on completion
    pub sound: SoundSource,
    /// Output format
    pub output: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sound: SoundSource::default_chime(),
            output: OutputFormat::Text,
        }
    }
}

impl SessionConfig {
    /// Builds the configuration from `run` arguments.
    pub fn from_args(args: &RunArgs) -> Self {
        Self {
            sound_enabled: !args.no_sound,
            sound: args
                .sound
                .as_ref()
                .map(|path| SoundSource::file(path.clone()))
                .unwrap_or_default(),
            output: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

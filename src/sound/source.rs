//! Sound source selection.
//!
//! The completion sound is either a short synthesized chime or an audio
//! file chosen by the user.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::SoundError;

/// Pitch of the built-in chime.
pub const CHIME_FREQUENCY_HZ: f32 = 880.0;

/// Length of the built-in chime.
pub const CHIME_DURATION: Duration = Duration::from_millis(300);

/// Playback volume for every completion sound.
pub const NOTIFICATION_VOLUME: f32 = 0.3;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aiff"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A short tone synthesized at playback time.
    Chime,
    /// An audio file on disk.
    File {
        /// Path to the audio file.
        path: PathBuf,
    },
}

impl SoundSource {
    /// Creates the built-in chime source.
    #[must_use]
    pub fn chime() -> Self {
        Self::Chime
    }

    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a file source after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` or `SoundError::UnsupportedFormat`.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        validate_sound_file(&path)?;
        Ok(Self::File { path })
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Chime => "chime".to_string(),
            Self::File { path } => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::Chime
    }
}

fn validate_sound_file(path: &Path) -> Result<(), SoundError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(SoundError::UnsupportedFormat(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

//! Sound system error types.
//!
//! Sound is best-effort: callers log these and carry on.

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

    /// The file extension is not a supported audio format.
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::DecodeError(_)
        )
    }

    /// Returns true if playback should fall back to the built-in chime.
    #[must_use]
    pub fn should_fallback_to_chime(&self) -> bool {
        self.is_file_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert_eq!(err.to_string(), "audio device not available: no device");

        let err = SoundError::FileNotFound("/path/to/sound.wav".to_string());
        assert!(err.to_string().contains("/path/to/sound.wav"));

        let err = SoundError::UnsupportedFormat("txt".to_string());
        assert!(err.to_string().contains("txt"));

        let err = SoundError::PlaybackError("unknown error".to_string());
        assert!(err.to_string().contains("unknown error"));
    }

    #[test]
    fn test_is_file_error() {
        assert!(SoundError::FileNotFound("x".into()).is_file_error());
        assert!(SoundError::UnsupportedFormat("x".into()).is_file_error());
        assert!(SoundError::DecodeError("x".into()).is_file_error());
        assert!(!SoundError::StreamError("x".into()).is_file_error());
    }

    #[test]
    fn test_should_fallback_to_chime() {
        assert!(SoundError::DecodeError("x".into()).should_fallback_to_chime());
        assert!(!SoundError::DeviceNotAvailable("x".into()).should_fallback_to_chime());
    }
}

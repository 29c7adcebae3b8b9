//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, CHIME_DURATION, CHIME_FREQUENCY_HZ, NOTIFICATION_VOLUME};

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sounds continue playing in the background.
/// The output stream is tied to the thread that created it, so keep the
/// player on the task that renders the terminal.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
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
    /// A file that cannot be opened or decoded falls back to the chime.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { path } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback_to_chime() => {
                    warn!(
                        "Failed to play '{}': {}, falling back to chime",
                        path.display(),
                        e
                    );
                    self.play_chime()
                }
                Err(e) => Err(e),
            },
            SoundSource::Chime => self.play_chime(),
        }
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.detached_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!("Sound file playback started (detached)");
        Ok(())
    }

    fn play_chime(&self) -> Result<(), SoundError> {
        let tone = SineWave::new(CHIME_FREQUENCY_HZ)
            .take_duration(CHIME_DURATION)
            .fade_in(CHIME_DURATION / 10);

        let sink = self.detached_sink()?;
        sink.append(tone);
        sink.detach();

        debug!("Chime playback started (detached)");
        Ok(())
    }

    fn detached_sink(&self) -> Result<Sink, SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.set_volume(NOTIFICATION_VOLUME);
        Ok(sink)
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}

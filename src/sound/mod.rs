//! Sound playback for session completion.
//!
//! Sound is best-effort. A missing audio device disables it with a warning,
//! and playback failures are logged and otherwise ignored.
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Audio file      │
//! │                  │     │  (--sound-file)  │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Chime           │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{SoundSource, CHIME_DURATION, CHIME_FREQUENCY_HZ, NOTIFICATION_VOLUME};

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Plays a sound without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

/// Plays `source` and swallows any error.
///
/// Returns true if playback was started.
pub fn play_best_effort<P: SoundPlayer + ?Sized>(player: &P, source: &SoundSource) -> bool {
    match player.play(source) {
        Ok(()) => true,
        Err(e) => {
            debug!("Completion sound skipped: {}", e);
            false
        }
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
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
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.clear();
        }
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(source.clone());
        }
        Ok(())
    }
}

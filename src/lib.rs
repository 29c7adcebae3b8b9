//! Study Timer Library
//!
//! This library provides the core functionality for the study timer CLI.
//! It includes:
//! - Session state machine with study/break modes, tasks and counters
//! - Async timer engine driving the countdown and auto-start
//! - CLI command parsing, display utilities and the interactive session
//! - Type definitions for configuration and state
//! - Sound playback for session completion

pub mod cli;
pub mod engine;
pub mod session;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigError, RunState, SessionStats, Task, TaskId, TimerConfig, TimerMode,
};

// Re-export session types
pub use session::{CompletionNotice, Resolution, SessionTimer, TickOutcome, TimerSnapshot};

// Re-export engine types
pub use engine::{EngineError, EngineHandle, TimerEngine, TimerEvent};

// Re-export sound types
pub use sound::{
    play_best_effort, try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundError,
    SoundPlayer, SoundSource,
};

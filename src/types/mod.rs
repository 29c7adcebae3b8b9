//! Core data types for the study timer.
//!
//! This module defines the data structures used for:
//! - Timer mode and run state
//! - Timer configuration with validation
//! - Tasks and session counters

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// TimerMode
// ============================================================================

/// Which kind of session the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused study session
    Study,
    /// Break between study sessions
    Break,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Study => "study",
            TimerMode::Break => "break",
        }
    }

    /// Returns the heading shown above the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Study => "Study Session",
            TimerMode::Break => "Break Time",
        }
    }

    /// Returns the mode suggested once a session of this mode completes.
    pub fn next(&self) -> TimerMode {
        match self {
            TimerMode::Study => TimerMode::Break,
            TimerMode::Break => TimerMode::Study,
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Study
    }
}

// ============================================================================
// RunState
// ============================================================================

/// Whether the countdown is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not started, reset, or finished
    Idle,
    /// Counting down
    Running,
    /// Stopped mid-session, remaining time kept
    Paused,
}

impl RunState {
    /// Returns the string representation of the run state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }

    /// Returns true if the countdown is active.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Upper bound for the study duration in minutes.
pub const MAX_STUDY_MINUTES: u32 = 120;

/// Upper bound for the break duration in minutes.
pub const MAX_BREAK_MINUTES: u32 = 60;

/// Upper bound for the auto-start delay in milliseconds.
pub const MAX_AUTO_START_DELAY_MS: u64 = 10_000;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("study duration must be between 1 and {MAX_STUDY_MINUTES} minutes (got {0})")]
    StudyMinutes(u32),

    #[error("break duration must be between 1 and {MAX_BREAK_MINUTES} minutes (got {0})")]
    BreakMinutes(u32),

    #[error("auto-start delay must be at most {MAX_AUTO_START_DELAY_MS} ms (got {0})")]
    AutoStartDelay(u64),
}

/// Configuration for the study timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Study duration in minutes (1-120)
    pub study_minutes: u32,
    /// Break duration in minutes (1-60)
    pub break_minutes: u32,
    /// Delay before an accepted notice starts the next session
    pub auto_start_delay_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            break_minutes: 5,
            auto_start_delay_ms: 500,
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with the specified study duration.
    pub fn with_study_minutes(mut self, minutes: u32) -> Self {
        self.study_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified break duration.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified auto-start delay.
    pub fn with_auto_start_delay_ms(mut self, delay_ms: u64) -> Self {
        self.auto_start_delay_ms = delay_ms;
        self
    }

    /// Nominal duration of a session in the given mode, in seconds.
    pub fn duration_secs(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Study => self.study_minutes.saturating_mul(60),
            TimerMode::Break => self.break_minutes.saturating_mul(60),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_STUDY_MINUTES).contains(&self.study_minutes) {
            return Err(ConfigError::StudyMinutes(self.study_minutes));
        }
        if !(1..=MAX_BREAK_MINUTES).contains(&self.break_minutes) {
            return Err(ConfigError::BreakMinutes(self.break_minutes));
        }
        if self.auto_start_delay_ms > MAX_AUTO_START_DELAY_MS {
            return Err(ConfigError::AutoStartDelay(self.auto_start_delay_ms));
        }
        Ok(())
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Unique task identifier, derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

// ============================================================================
// SessionStats
// ============================================================================

/// Counters shown next to the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Tasks currently marked as completed
    pub completed_tasks: u32,
    /// Study sessions that ran to completion
    pub study_sessions: u32,
    /// Break sessions that ran to completion
    pub break_sessions: u32,
}

// ============================================================================
// Tests
// ============================================================================

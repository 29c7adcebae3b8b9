//! Completion notices and how the user resolves them.

use serde::{Deserialize, Serialize};

use crate::types::{TimerConfig, TimerMode};

/// Notification raised when a session runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotice {
    /// Mode of the session that just finished
    pub completed_mode: TimerMode,
    /// Mode the user is invited to switch to
    pub next_mode: TimerMode,
    pub title: String,
    pub message: String,
    pub icon: String,
    /// Label of the "start next session now" choice
    pub accept_label: String,
    /// Label of the "not now" choice
    pub defer_label: String,
}

impl CompletionNotice {
    /// Builds the notice for a finished session of `completed_mode`.
    pub fn for_completed(completed_mode: TimerMode, config: &TimerConfig) -> Self {
        let next_mode = completed_mode.next();
        let (title, message, icon) = match completed_mode {
            TimerMode::Study => (
                "Study Session Complete!".to_string(),
                format!(
                    "Great job! You've completed a {}-minute study session. \
                     Time for a well-deserved break!",
                    config.study_minutes
                ),
                "🎉",
            ),
            TimerMode::Break => (
                "Break Time Over!".to_string(),
                "Hope you feel refreshed! Ready to dive back into your studies?".to_string(),
                "💪",
            ),
        };
        let accept_label = match next_mode {
            TimerMode::Break => "Start Break",
            TimerMode::Study => "Start Study Session",
        };

        Self {
            completed_mode,
            next_mode,
            title,
            message,
            icon: icon.to_string(),
            accept_label: accept_label.to_string(),
            defer_label: "Maybe Later".to_string(),
        }
    }
}

/// The ways a pending notice can be closed.
///
/// Every resolution switches to the suggested mode; only `Accept` also
/// starts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Start the next session after a short delay
    Accept,
    /// Switch mode, stay idle
    Defer,
    /// Clicked away from the notice
    Dismiss,
    /// Cancel key
    Cancel,
}

impl Resolution {
    /// Returns true if the next session should start on its own.
    pub fn auto_starts(&self) -> bool {
        matches!(self, Resolution::Accept)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Accept => "accept",
            Resolution::Defer => "defer",
            Resolution::Dismiss => "dismiss",
            Resolution::Cancel => "cancel",
        }
    }
}

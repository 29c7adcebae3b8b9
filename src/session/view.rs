//! Read-only projection of the timer for rendering.

use serde::{Deserialize, Serialize};

use crate::types::{RunState, SessionStats, Task, TimerMode};

use super::notice::CompletionNotice;
use super::timer::SessionTimer;

/// Point-in-time copy of everything a view needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub run_state: RunState,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub tasks: Vec<Task>,
    pub stats: SessionStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_notice: Option<CompletionNotice>,
}

impl TimerSnapshot {
    /// Remaining time as `MM:SS`.
    pub fn time_text(&self) -> String {
        format_time(self.remaining_seconds)
    }

    /// Elapsed share of the session in percent.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.total_seconds, self.remaining_seconds)
    }

    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    /// The start control is enabled unless the timer is running or a
    /// completion notice is waiting.
    pub fn can_start(&self) -> bool {
        !self.run_state.is_running() && self.pending_notice.is_none()
    }

    /// The pause control is enabled only while running.
    pub fn can_pause(&self) -> bool {
        self.run_state.is_running()
    }
}

impl SessionTimer {
    /// Captures the current state for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode(),
            run_state: self.run_state(),
            remaining_seconds: self.remaining_seconds(),
            total_seconds: self.total_seconds(),
            tasks: self.tasks().to_vec(),
            stats: self.stats(),
            pending_notice: self.pending_notice().cloned(),
        }
    }
}

/// Formats seconds as zero-padded `MM:SS`. Minutes are not capped at 59.
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// `(total - remaining) / total * 100`, or 0 for an empty session.
pub fn progress_percent(total_seconds: u32, remaining_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    let elapsed = total_seconds.saturating_sub(remaining_seconds);
    f64::from(elapsed) / f64::from(total_seconds) * 100.0
}

/// Renders a fixed-width text progress bar.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

//! The study timer state machine.
//!
//! `SessionTimer` knows nothing about clocks or output. A driver calls
//! [`SessionTimer::tick`] once per second while the timer is running and
//! forwards user commands; every command is a silent no-op when it does
//! not apply, and reports whether anything changed.

use crate::types::{RunState, SessionStats, Task, TaskId, TimerConfig, TimerMode};

use super::notice::{CompletionNotice, Resolution};
use super::tasks::TaskList;

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// One second elapsed and the session continues.
    Counting {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// The countdown hit zero and the session was completed.
    Completed(CompletionNotice),
}

// ============================================================================
// SessionTimer
// ============================================================================

/// Timer, task list and counters for one study session window.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    config: TimerConfig,
    mode: TimerMode,
    run_state: RunState,
    remaining_seconds: u32,
    total_seconds: u32,
    tasks: TaskList,
    stats: SessionStats,
    pending_notice: Option<CompletionNotice>,
}

impl SessionTimer {
    /// Creates an idle timer in study mode with a full study countdown.
    pub fn new(config: TimerConfig) -> Self {
        let mode = TimerMode::Study;
        let duration = config.duration_secs(mode);
        Self {
            config,
            mode,
            run_state: RunState::Idle,
            remaining_seconds: duration,
            total_seconds: duration,
            tasks: TaskList::new(),
            stats: SessionStats::default(),
            pending_notice: None,
        }
    }

    // ------------------------------------------------------------------------
    // Timer commands
    // ------------------------------------------------------------------------

    /// Starts or resumes the countdown.
    ///
    /// Returns false if the timer was already running or a completion
    /// notice is still waiting to be resolved.
    pub fn start(&mut self) -> bool {
        if self.run_state.is_running() || self.pending_notice.is_some() {
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// Returns false unless the timer was running.
    pub fn pause(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        self.run_state = RunState::Paused;
        true
    }

    /// Stops the countdown and refills it for the current mode.
    ///
    /// A pending completion notice is left in place.
    pub fn reset(&mut self) {
        self.run_state = RunState::Idle;
        self.refill();
    }

    /// Switches mode and refills the countdown.
    ///
    /// Rejected while running or while a completion notice is pending;
    /// resolving the notice performs the switch. The run state is left
    /// alone, so a paused timer stays paused with the new mode's full
    /// duration.
    pub fn set_mode(&mut self, mode: TimerMode) -> bool {
        if self.run_state.is_running() || self.pending_notice.is_some() {
            return false;
        }
        self.mode = mode;
        self.refill();
        true
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.run_state.is_running() {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            return TickOutcome::Completed(self.complete_session());
        }

        TickOutcome::Counting {
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Closes the pending notice by switching to its suggested mode.
    ///
    /// Returns the mode switched to, or `None` if no notice was pending.
    pub fn resolve_notice(&mut self, resolution: Resolution) -> Option<TimerMode> {
        let notice = self.pending_notice.take()?;
        tracing::debug!(
            resolution = resolution.as_str(),
            next_mode = notice.next_mode.as_str(),
            "resolving completion notice"
        );
        self.set_mode(notice.next_mode);
        Some(notice.next_mode)
    }

    fn complete_session(&mut self) -> CompletionNotice {
        self.run_state = RunState::Idle;
        match self.mode {
            TimerMode::Study => self.stats.study_sessions += 1,
            TimerMode::Break => self.stats.break_sessions += 1,
        }

        let notice = CompletionNotice::for_completed(self.mode, &self.config);
        self.pending_notice = Some(notice.clone());
        notice
    }

    fn refill(&mut self) {
        let duration = self.config.duration_secs(self.mode);
        self.remaining_seconds = duration;
        self.total_seconds = duration;
    }

    // ------------------------------------------------------------------------
    // Task commands
    // ------------------------------------------------------------------------

    /// Appends a task; blank text is ignored.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        self.tasks.add(text)
    }

    /// Flips a task's completed flag and keeps the counter in step.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        match self.tasks.toggle(id) {
            Some(true) => {
                self.stats.completed_tasks += 1;
                true
            }
            Some(false) => {
                self.stats.completed_tasks = self.stats.completed_tasks.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Removes a task, uncounting it first if it was completed.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(was_completed) = self.tasks.get(id).map(|t| t.completed) else {
            return false;
        };
        if was_completed {
            self.stats.completed_tasks = self.stats.completed_tasks.saturating_sub(1);
        }
        self.tasks.remove(id).is_some()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn pending_notice(&self) -> Option<&CompletionNotice> {
        self.pending_notice.as_ref()
    }

    /// Returns a mutable reference to the remaining time (for testing).
    #[cfg(test)]
    pub(crate) fn remaining_seconds_mut(&mut self) -> &mut u32 {
        &mut self.remaining_seconds
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Display utilities for the study timer CLI.
//!
//! This module provides formatted output for:
//! - Timer events
//! - Status and task lists
//! - Completion notices
//! - Error messages

use crate::engine::TimerEvent;
use crate::session::{format_time, progress_bar, CompletionNotice, TimerSnapshot};
use crate::types::{SessionStats, Task, TimerMode};

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the banner printed when the session opens.
    pub fn show_welcome(snapshot: &TimerSnapshot) {
        println!("Study Timer");
        println!("─────────────────────────────");
        println!("{}", Self::format_status(snapshot));
        println!("Type `help` for commands, `start` to begin.");
    }

    /// Shows the rendering of an event, if it has one.
    pub fn show_event(event: &TimerEvent) {
        if let Some(text) = Self::format_event(event) {
            println!("{}", text);
        }
    }

    /// Shows the current timer status.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!("{}", Self::format_status(snapshot));
    }

    /// Shows the task list followed by the counters.
    pub fn show_tasks(tasks: &[Task], stats: &SessionStats) {
        println!("{}", Self::format_tasks(tasks));
        println!("{}", Self::format_stats(stats));
    }

    /// Shows a message.
    pub fn show_message(message: &str) {
        println!("{}", message);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    // ------------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------------

    /// Formats an event. Ticks only render on whole minutes.
    pub fn format_event(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Started {
                mode,
                remaining_seconds,
            } => Some(format!(
                "> {} started ({} remaining)",
                mode.label(),
                format_time(*remaining_seconds)
            )),
            TimerEvent::Paused { remaining_seconds } => Some(format!(
                "|| Paused ({} remaining)",
                format_time(*remaining_seconds)
            )),
            TimerEvent::Reset {
                mode,
                remaining_seconds,
            } => Some(format!(
                "[] Reset: {} {}",
                mode.label(),
                format_time(*remaining_seconds)
            )),
            TimerEvent::ModeChanged {
                mode,
                remaining_seconds,
            } => Some(Self::format_mode_line(*mode, *remaining_seconds)),
            TimerEvent::Tick {
                remaining_seconds,
                total_seconds,
            } => {
                if *remaining_seconds == 0 || remaining_seconds % 60 != 0 {
                    return None;
                }
                let percent = crate::session::progress_percent(*total_seconds, *remaining_seconds);
                Some(format!(
                    "  {} {} {:.0}%",
                    format_time(*remaining_seconds),
                    progress_bar(percent, BAR_WIDTH),
                    percent
                ))
            }
            TimerEvent::SessionCompleted { notice, stats } => Some(format!(
                "{}\n{}",
                Self::format_notice(notice),
                Self::format_stats(stats)
            )),
            TimerEvent::NoticeResolved {
                next_mode,
                remaining_seconds,
                auto_start,
                ..
            } => {
                if *auto_start {
                    Some(format!("> Starting {}...", next_mode.label()))
                } else {
                    Some(Self::format_mode_line(*next_mode, *remaining_seconds))
                }
            }
            TimerEvent::AutoStartCancelled => Some("Auto-start cancelled".to_string()),
            TimerEvent::TasksChanged { tasks, stats } => Some(format!(
                "{}\n{}",
                Self::format_tasks(tasks),
                Self::format_stats(stats)
            )),
        }
    }

    /// Formats the timer block.
    pub fn format_status(snapshot: &TimerSnapshot) -> String {
        let percent = snapshot.progress_percent();

        let mut controls = Vec::new();
        if snapshot.can_start() {
            controls.push("start");
        }
        if snapshot.can_pause() {
            controls.push("pause");
        }
        controls.push("reset");

        let mut lines = vec![
            format!(
                "{}  {}  ({})",
                snapshot.label(),
                snapshot.time_text(),
                snapshot.run_state.as_str()
            ),
            format!("  {} {:.0}%", progress_bar(percent, BAR_WIDTH), percent),
            format!("  Controls: {}", controls.join(" | ")),
        ];
        if let Some(notice) = &snapshot.pending_notice {
            lines.push(format!(
                "  {} waiting: `accept` to {}, `defer` to switch without starting",
                notice.title,
                notice.accept_label.to_lowercase()
            ));
        }
        lines.join("\n")
    }

    /// Formats the task list with 1-based positions.
    pub fn format_tasks(tasks: &[Task]) -> String {
        if tasks.is_empty() {
            return "  (no tasks yet)".to_string();
        }
        tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let mark = if task.completed { "x" } else { " " };
                format!("  {}. [{}] {}", i + 1, mark, task.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats the session counters.
    pub fn format_stats(stats: &SessionStats) -> String {
        format!(
            "Tasks done: {} | Study sessions: {} | Breaks: {}",
            stats.completed_tasks, stats.study_sessions, stats.break_sessions
        )
    }

    /// Formats a completion notice with its choices.
    pub fn format_notice(notice: &CompletionNotice) -> String {
        format!(
            "\n{} {}\n  {}\n  [accept] {}   [defer] {}   (Enter or `cancel` to dismiss)",
            notice.icon, notice.title, notice.message, notice.accept_label, notice.defer_label
        )
    }

    fn format_mode_line(mode: TimerMode, remaining_seconds: u32) -> String {
        format!("~ {} ({})", mode.label(), format_time(remaining_seconds))
    }
}

// ============================================================================
// Tests
// ============================================================================

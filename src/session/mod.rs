//! Pure study-timer state.
//!
//! This module contains everything that does not need a clock or a screen:
//! - `timer`: the `SessionTimer` state machine
//! - `tasks`: the in-memory task list
//! - `notice`: completion notices and their resolutions
//! - `view`: snapshot and display projection

pub mod notice;
pub mod tasks;
pub mod timer;
pub mod view;

pub use notice::{CompletionNotice, Resolution};
pub use tasks::TaskList;
pub use timer::{SessionTimer, TickOutcome};
pub use view::{format_time, progress_bar, progress_percent, TimerSnapshot};

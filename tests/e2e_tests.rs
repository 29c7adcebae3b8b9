//! End-to-End Tests for the study timer engine.
//!
//! These tests drive complete user workflows through the engine handle:
//! - Study session, accepted notice, break session, deferred notice
//! - Pause and resume
//! - The three non-accepting resolutions behaving alike
//! - Auto-start cancelled by a later command
//! - Tasks and counters across sessions

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use studytimer::engine::{EngineHandle, TimerEngine, TimerEvent};
use studytimer::session::{Resolution, TimerSnapshot};
use studytimer::types::{RunState, TimerConfig, TimerMode};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a fast configuration for quick tests (1-minute sessions).
fn create_fast_config() -> TimerConfig {
    TimerConfig::default()
        .with_study_minutes(1)
        .with_break_minutes(1)
}

/// Spawns an engine and returns its handle, event receiver and task.
fn spawn_engine(
    config: TimerConfig,
) -> (
    EngineHandle,
    mpsc::UnboundedReceiver<TimerEvent>,
    JoinHandle<anyhow::Result<()>>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (handle, task) = TimerEngine::spawn(config, tx);
    (handle, rx, task)
}

/// Collects every event published so far.
fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn snapshot(handle: &EngineHandle) -> TimerSnapshot {
    handle.snapshot().await.unwrap()
}

/// Starts the current session and waits until it has run out.
async fn run_to_completion(handle: &EngineHandle) {
    handle.start().unwrap();
    sleep(Duration::from_millis(60_500)).await;
}

// ============================================================================
// Full Cycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_study_accept_break_defer_cycle() {
    let (handle, mut rx, task) = spawn_engine(create_fast_config());

    // Study session
    run_to_completion(&handle).await;
    let state = snapshot(&handle).await;
    assert_eq!(state.mode, TimerMode::Study);
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.remaining_seconds, 0);
    assert_eq!(state.stats.study_sessions, 1);
    let notice = state.pending_notice.expect("notice after study");
    assert_eq!(notice.next_mode, TimerMode::Break);

    // Accept starts the break after the delay
    handle.resolve(Resolution::Accept).unwrap();
    let state = snapshot(&handle).await;
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.run_state, RunState::Idle);

    sleep(Duration::from_millis(600)).await;
    let state = snapshot(&handle).await;
    assert_eq!(state.run_state, RunState::Running);
    assert_eq!(state.remaining_seconds, 60);

    // Break session
    sleep(Duration::from_secs(60)).await;
    let state = snapshot(&handle).await;
    assert_eq!(state.stats.break_sessions, 1);
    assert_eq!(
        state.pending_notice.map(|n| n.next_mode),
        Some(TimerMode::Study)
    );

    // Defer switches back without starting
    handle.resolve(Resolution::Defer).unwrap();
    sleep(Duration::from_secs(5)).await;
    let state = snapshot(&handle).await;
    assert_eq!(state.mode, TimerMode::Study);
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.remaining_seconds, 60);
    assert!(state.pending_notice.is_none());

    let events = drain(&mut rx);
    let completions = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::SessionCompleted { .. }))
        .count();
    assert_eq!(completions, 2);

    let auto_starts: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            TimerEvent::NoticeResolved { auto_start, .. } => Some(*auto_start),
            _ => None,
        })
        .collect();
    assert_eq!(auto_starts, vec![true, false]);

    handle.shutdown().unwrap();
    task.await.unwrap().unwrap();
}

// ============================================================================
// Pause and Resume
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_and_resume_keeps_remaining_time() {
    let (handle, _rx, _task) = spawn_engine(create_fast_config());

    handle.start().unwrap();
    sleep(Duration::from_millis(10_500)).await;
    handle.pause().unwrap();

    let paused = snapshot(&handle).await;
    assert_eq!(paused.run_state, RunState::Paused);
    assert_eq!(paused.remaining_seconds, 50);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(snapshot(&handle).await.remaining_seconds, 50);

    handle.start().unwrap();
    sleep(Duration::from_millis(50_500)).await;

    let done = snapshot(&handle).await;
    assert_eq!(done.remaining_seconds, 0);
    assert_eq!(done.stats.study_sessions, 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_while_running_refills() {
    let (handle, _rx, _task) = spawn_engine(create_fast_config());

    handle.start().unwrap();
    sleep(Duration::from_millis(20_500)).await;
    handle.reset().unwrap();

    let state = snapshot(&handle).await;
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.remaining_seconds, 60);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(snapshot(&handle).await.remaining_seconds, 60);
}

// ============================================================================
// Notice Resolutions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_non_accepting_resolutions_match() {
    let mut outcomes = Vec::new();

    for resolution in [Resolution::Defer, Resolution::Dismiss, Resolution::Cancel] {
        let (handle, _rx, _task) = spawn_engine(create_fast_config());
        run_to_completion(&handle).await;
        handle.resolve(resolution).unwrap();
        sleep(Duration::from_secs(2)).await;

        let state = snapshot(&handle).await;
        outcomes.push((
            state.mode,
            state.run_state,
            state.remaining_seconds,
            state.total_seconds,
            state.stats,
            state.pending_notice.is_some(),
        ));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[1], outcomes[2]);
    assert_eq!(outcomes[0].0, TimerMode::Break);
    assert_eq!(outcomes[0].1, RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_auto_start_delay_cancels_it() {
    let (handle, mut rx, _task) = spawn_engine(create_fast_config());

    run_to_completion(&handle).await;
    handle.resolve(Resolution::Accept).unwrap();
    handle.reset().unwrap();
    sleep(Duration::from_secs(2)).await;

    let state = snapshot(&handle).await;
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.run_state, RunState::Idle);

    let events = drain(&mut rx);
    assert!(events.contains(&TimerEvent::AutoStartCancelled));
    assert!(!events.iter().any(|e| matches!(
        e,
        TimerEvent::Started {
            mode: TimerMode::Break,
            ..
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_task_edit_does_not_cancel_auto_start() {
    let (handle, _rx, _task) = spawn_engine(create_fast_config());

    run_to_completion(&handle).await;
    handle.resolve(Resolution::Accept).unwrap();
    handle.add_task("stretch").unwrap();
    sleep(Duration::from_secs(1)).await;

    let state = snapshot(&handle).await;
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.run_state, RunState::Running);
    assert_eq!(state.tasks.len(), 1);
}

// ============================================================================
// Tasks Across Sessions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_tasks_survive_sessions() {
    let (handle, _rx, _task) = spawn_engine(create_fast_config());

    handle.add_task("read ch.1").unwrap();
    handle.add_task("  ").unwrap();
    handle.add_task("write summary").unwrap();
    let state = snapshot(&handle).await;
    assert_eq!(state.tasks.len(), 2);

    handle.toggle_task(state.tasks[0].id).unwrap();
    run_to_completion(&handle).await;
    handle.resolve(Resolution::Dismiss).unwrap();

    let state = snapshot(&handle).await;
    assert_eq!(state.tasks.len(), 2);
    assert!(state.tasks[0].completed);
    assert_eq!(state.stats.completed_tasks, 1);
    assert_eq!(state.stats.study_sessions, 1);

    // Deleting a completed task takes it off the counter
    handle.delete_task(state.tasks[0].id).unwrap();
    let state = snapshot(&handle).await;
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.stats.completed_tasks, 0);
}

#[tokio::test]
async fn test_long_session_time_text() {
    let config = TimerConfig::default().with_study_minutes(120);
    let (handle, _rx, _task) = spawn_engine(config);

    let state = snapshot(&handle).await;
    assert_eq!(state.time_text(), "120:00");
    assert_eq!(state.progress_percent(), 0.0);
}

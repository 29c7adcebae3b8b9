//! Timer engine for the study timer.
//!
//! This module drives a [`SessionTimer`] in real time:
//! - Commands arrive over a channel from any number of [`EngineHandle`]s
//! - One `tokio::time::interval` tick source exists only while running
//! - Accepting a completion notice arms a single-shot auto-start delay
//! - State changes are published as [`TimerEvent`]s

use std::future::pending;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info};

use crate::session::{CompletionNotice, Resolution, SessionTimer, TickOutcome, TimerSnapshot};
use crate::types::{SessionStats, Task, TaskId, TimerConfig, TimerMode};

/// Period of the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// State changes published to views. No-op commands publish nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        mode: TimerMode,
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused { remaining_seconds: u32 },
    /// Countdown stopped and refilled
    Reset {
        mode: TimerMode,
        remaining_seconds: u32,
    },
    /// Mode switched while not running
    ModeChanged {
        mode: TimerMode,
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        remaining_seconds: u32,
        total_seconds: u32,
    },
    /// Countdown reached zero
    SessionCompleted {
        notice: CompletionNotice,
        stats: SessionStats,
    },
    /// The pending notice was closed
    NoticeResolved {
        resolution: Resolution,
        next_mode: TimerMode,
        remaining_seconds: u32,
        /// Whether the next session is about to start on its own
        auto_start: bool,
    },
    /// A pending auto-start was superseded by another command
    AutoStartCancelled,
    /// The task list or the completed-task counter changed
    TasksChanged {
        tasks: Vec<Task>,
        stats: SessionStats,
    },
}

// ============================================================================
// EngineCommand / EngineHandle
// ============================================================================

/// Commands accepted by the engine.
#[derive(Debug)]
pub enum EngineCommand {
    Start,
    Pause,
    Reset,
    SetMode(TimerMode),
    AddTask(String),
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    Resolve(Resolution),
    Snapshot(oneshot::Sender<TimerSnapshot>),
    Shutdown,
}

impl EngineCommand {
    /// Commands that touch the countdown and therefore supersede a
    /// pending auto-start.
    fn is_timer_command(&self) -> bool {
        matches!(
            self,
            EngineCommand::Start
                | EngineCommand::Pause
                | EngineCommand::Reset
                | EngineCommand::SetMode(_)
                | EngineCommand::Resolve(_)
        )
    }
}

/// Engine errors seen by command senders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("timer engine has stopped")]
    Closed,
}

/// Cloneable sender side of the engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Queues a raw command.
    pub fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.tx.send(command).map_err(|_| EngineError::Closed)
    }

    pub fn start(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Start)
    }

    pub fn pause(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Pause)
    }

    pub fn reset(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Reset)
    }

    pub fn set_mode(&self, mode: TimerMode) -> Result<(), EngineError> {
        self.send(EngineCommand::SetMode(mode))
    }

    pub fn add_task(&self, text: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::AddTask(text.into()))
    }

    pub fn toggle_task(&self, id: TaskId) -> Result<(), EngineError> {
        self.send(EngineCommand::ToggleTask(id))
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), EngineError> {
        self.send(EngineCommand::DeleteTask(id))
    }

    pub fn resolve(&self, resolution: Resolution) -> Result<(), EngineError> {
        self.send(EngineCommand::Resolve(resolution))
    }

    /// Asks the engine for a snapshot once every earlier command is applied.
    pub async fn snapshot(&self) -> Result<TimerSnapshot, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot(tx))?;
        rx.await.map_err(|_| EngineError::Closed)
    }

    /// Stops the engine loop.
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Shutdown)
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the timer state, the tick source and the auto-start delay.
pub struct TimerEngine {
    /// Timer state
    timer: SessionTimer,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Incoming commands
    command_rx: mpsc::UnboundedReceiver<EngineCommand>,
    /// Present exactly while the timer is running
    ticker: Option<Interval>,
    /// Armed by an accepted notice
    auto_start: Option<Pin<Box<Sleep>>>,
}

impl TimerEngine {
    /// Creates an engine and the handle used to command it.
    pub fn new(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> (Self, EngineHandle) {
        let (tx, command_rx) = mpsc::unbounded_channel();
        let engine = Self {
            timer: SessionTimer::new(config),
            event_tx,
            command_rx,
            ticker: None,
            auto_start: None,
        };
        (engine, EngineHandle { tx })
    }

    /// Creates an engine and runs it on a new tokio task.
    pub fn spawn(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> (EngineHandle, JoinHandle<Result<()>>) {
        let (engine, handle) = Self::new(config, event_tx);
        (handle, tokio::spawn(engine.run()))
    }

    /// Runs the engine until shutdown or until every handle is dropped.
    pub async fn run(mut self) -> Result<()> {
        info!("Timer engine started");

        loop {
            tokio::select! {
                biased;

                command = self.command_rx.recv() => match command {
                    None | Some(EngineCommand::Shutdown) => break,
                    Some(command) => self.handle_command(command)?,
                },
                _ = next_tick(&mut self.ticker) => self.handle_tick()?,
                _ = auto_start_due(&mut self.auto_start) => {
                    self.auto_start = None;
                    debug!("Auto-start delay elapsed");
                    self.start()?;
                }
            }
        }

        info!("Timer engine stopped");
        Ok(())
    }

    fn handle_command(&mut self, command: EngineCommand) -> Result<()> {
        if command.is_timer_command() {
            self.cancel_auto_start()?;
        }

        match command {
            EngineCommand::Start => self.start()?,
            EngineCommand::Pause => {
                if self.timer.pause() {
                    self.ticker = None;
                    self.emit(TimerEvent::Paused {
                        remaining_seconds: self.timer.remaining_seconds(),
                    })?;
                }
            }
            EngineCommand::Reset => {
                self.timer.reset();
                self.ticker = None;
                self.emit(TimerEvent::Reset {
                    mode: self.timer.mode(),
                    remaining_seconds: self.timer.remaining_seconds(),
                })?;
            }
            EngineCommand::SetMode(mode) => {
                if self.timer.set_mode(mode) {
                    self.emit(TimerEvent::ModeChanged {
                        mode,
                        remaining_seconds: self.timer.remaining_seconds(),
                    })?;
                } else {
                    debug!("Mode switch ignored: running or notice pending");
                }
            }
            EngineCommand::AddTask(text) => {
                if self.timer.add_task(&text).is_some() {
                    self.emit_tasks()?;
                }
            }
            EngineCommand::ToggleTask(id) => {
                if self.timer.toggle_task(id) {
                    self.emit_tasks()?;
                }
            }
            EngineCommand::DeleteTask(id) => {
                if self.timer.delete_task(id) {
                    self.emit_tasks()?;
                }
            }
            EngineCommand::Resolve(resolution) => self.resolve(resolution)?,
            EngineCommand::Snapshot(reply) => {
                // The requester may have given up waiting
                let _ = reply.send(self.timer.snapshot());
            }
            EngineCommand::Shutdown => {}
        }

        Ok(())
    }

    /// Starts the countdown and its tick source.
    fn start(&mut self) -> Result<()> {
        if !self.timer.start() {
            debug!("Start ignored: running or notice pending");
            return Ok(());
        }

        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(ticker);

        self.emit(TimerEvent::Started {
            mode: self.timer.mode(),
            remaining_seconds: self.timer.remaining_seconds(),
        })
    }

    fn handle_tick(&mut self) -> Result<()> {
        match self.timer.tick() {
            TickOutcome::Ignored => {
                self.ticker = None;
            }
            TickOutcome::Counting { remaining_seconds } => {
                self.emit(TimerEvent::Tick {
                    remaining_seconds,
                    total_seconds: self.timer.total_seconds(),
                })?;
            }
            TickOutcome::Completed(notice) => {
                self.ticker = None;
                info!(
                    mode = notice.completed_mode.as_str(),
                    "Session completed"
                );
                self.emit(TimerEvent::Tick {
                    remaining_seconds: 0,
                    total_seconds: self.timer.total_seconds(),
                })?;
                self.emit(TimerEvent::SessionCompleted {
                    notice,
                    stats: self.timer.stats(),
                })?;
            }
        }
        Ok(())
    }

    fn resolve(&mut self, resolution: Resolution) -> Result<()> {
        let Some(next_mode) = self.timer.resolve_notice(resolution) else {
            debug!("No pending notice to resolve");
            return Ok(());
        };

        let auto_start = resolution.auto_starts();
        if auto_start {
            let delay = Duration::from_millis(self.timer.config().auto_start_delay_ms);
            self.auto_start = Some(Box::pin(sleep(delay)));
        }

        self.emit(TimerEvent::NoticeResolved {
            resolution,
            next_mode,
            remaining_seconds: self.timer.remaining_seconds(),
            auto_start,
        })
    }

    fn cancel_auto_start(&mut self) -> Result<()> {
        if self.auto_start.take().is_some() {
            debug!("Pending auto-start cancelled");
            self.emit(TimerEvent::AutoStartCancelled)?;
        }
        Ok(())
    }

    fn emit_tasks(&self) -> Result<()> {
        self.emit(TimerEvent::TasksChanged {
            tasks: self.timer.tasks().to_vec(),
            stats: self.timer.stats(),
        })
    }

    fn emit(&self, event: TimerEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send timer event")
    }
}

/// Resolves on the next tick, or never when no tick source exists.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending::<()>().await,
    }
}

/// Resolves when the auto-start delay elapses, or never when unarmed.
async fn auto_start_due(delay: &mut Option<Pin<Box<Sleep>>>) {
    match delay {
        Some(delay) => delay.as_mut().await,
        None => pending::<()>().await,
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Interactive terminal session.
//!
//! Reads one command per line, forwards it to the timer engine and renders
//! the events the engine publishes. The completion sound is played here,
//! on the task that owns the terminal.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::{EngineHandle, TimerEvent};
use crate::session::{Resolution, TimerSnapshot};
use crate::sound::{play_best_effort, SoundPlayer, SoundSource};
use crate::types::{Task, TaskId, TimerMode};

use super::commands::{command_remainder, parse_line, InteractiveCommand};
use super::display::Display;

/// Whether the input loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-driven front end over a running [`TimerEngine`](crate::engine::TimerEngine).
pub struct InteractiveSession {
    handle: EngineHandle,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    player: Option<Arc<dyn SoundPlayer>>,
    sound: SoundSource,
    /// Task ids in the order they were last shown, for 1-based positions.
    task_ids: Vec<TaskId>,
    notice_pending: bool,
}

impl InteractiveSession {
    pub fn new(
        handle: EngineHandle,
        events: mpsc::UnboundedReceiver<TimerEvent>,
        player: Option<Arc<dyn SoundPlayer>>,
        sound: SoundSource,
    ) -> Self {
        Self {
            handle,
            events,
            player,
            sound,
            task_ids: Vec::new(),
            notice_pending: false,
        }
    }

    /// Runs until `quit`, end of input or Ctrl-C.
    ///
    /// The engine is left running. Keep the session alive until the engine
    /// has been shut down so late events still have a receiver.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        debug!("Input closed");
                        break;
                    };
                    if self.handle_line(&line).await? == Flow::Quit {
                        break;
                    }
                }
                Some(event) = self.events.recv() => {
                    self.handle_event(&event);
                }
                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                if self.notice_pending {
                    self.handle.resolve(Resolution::Dismiss)?;
                }
                return Ok(Flow::Continue);
            }
            Err(e) => {
                // Help and usage errors are rendered by clap itself.
                let _ = e.print();
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "Interactive command");

        match command {
            InteractiveCommand::Start => self.handle.start()?,
            InteractiveCommand::Pause => self.handle.pause()?,
            InteractiveCommand::Reset => self.handle.reset()?,
            InteractiveCommand::Study => self.handle.set_mode(TimerMode::Study)?,
            InteractiveCommand::Break => self.handle.set_mode(TimerMode::Break)?,
            InteractiveCommand::Add { text } if text.is_empty() => {
                Display::show_error("task text is empty");
            }
            InteractiveCommand::Add { .. } => {
                self.handle.add_task(command_remainder(line))?;
            }
            InteractiveCommand::Done { position } => match self.task_at(position) {
                Some(id) => self.handle.toggle_task(id)?,
                None => Display::show_error(&format!("no task #{}", position)),
            },
            InteractiveCommand::Delete { position } => match self.task_at(position) {
                Some(id) => self.handle.delete_task(id)?,
                None => Display::show_error(&format!("no task #{}", position)),
            },
            InteractiveCommand::List => {
                let snapshot = self.snapshot().await?;
                Display::show_tasks(&snapshot.tasks, &snapshot.stats);
            }
            InteractiveCommand::Status => {
                let snapshot = self.snapshot().await?;
                Display::show_status(&snapshot);
            }
            InteractiveCommand::Json => {
                let snapshot = self.snapshot().await?;
                let json = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize snapshot")?;
                Display::show_message(&json);
            }
            InteractiveCommand::Accept => self.resolve(Resolution::Accept)?,
            InteractiveCommand::Defer => self.resolve(Resolution::Defer)?,
            InteractiveCommand::Cancel => self.resolve(Resolution::Cancel)?,
            InteractiveCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn handle_event(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::SessionCompleted { .. } => {
                self.notice_pending = true;
                if let Some(player) = &self.player {
                    play_best_effort(player.as_ref(), &self.sound);
                }
            }
            TimerEvent::NoticeResolved { .. } => self.notice_pending = false,
            TimerEvent::TasksChanged { tasks, .. } => self.remember_tasks(tasks),
            _ => {}
        }
        Display::show_event(event);
    }

    fn resolve(&mut self, resolution: Resolution) -> Result<()> {
        if !self.notice_pending {
            Display::show_message("Nothing to answer right now.");
            return Ok(());
        }
        self.handle.resolve(resolution)?;
        Ok(())
    }

    async fn snapshot(&mut self) -> Result<TimerSnapshot> {
        let snapshot = self.handle.snapshot().await?;
        self.remember_tasks(&snapshot.tasks);
        self.notice_pending = snapshot.pending_notice.is_some();
        Ok(snapshot)
    }

    fn remember_tasks(&mut self, tasks: &[Task]) {
        self.task_ids = tasks.iter().map(|task| task.id).collect();
    }

    fn task_at(&self, position: usize) -> Option<TaskId> {
        position
            .checked_sub(1)
            .and_then(|index| self.task_ids.get(index))
            .copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! In-memory task list.
//!
//! Tasks keep insertion order. Ids come from the creation time in
//! milliseconds and are bumped when two tasks land in the same millisecond.

use chrono::Utc;

use crate::types::{Task, TaskId};

/// Ordered list of tasks with unique ids.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_id: i64,
}

impl TaskList {
    /// Creates an empty task list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task and returns its id.
    ///
    /// Returns `None` when the trimmed text is empty.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id();
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    /// Flips the completed flag and returns the new value.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Removes a task and returns it.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Returns the task with the given id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in display order.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    fn next_id(&mut self) -> TaskId {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        TaskId(id)
    }
}

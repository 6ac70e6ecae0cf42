use chrono::{DateTime, Duration, Local, NaiveDateTime};
use log::debug;

use crate::model::task::{Priority, Task};
use crate::ops::search;
use crate::ops::sort::{SortKey, sort_tasks};

/// Error type for task store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no task at position {position} (store has {len} tasks)")]
    OutOfRange { position: usize, len: usize },
}

/// The in-memory, ordered collection of tasks.
///
/// Order is insertion order until the first `sort`, then the last applied
/// sort order. Positions are 0-based indices into the current order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, position: usize) -> Result<&Task, StoreError> {
        let len = self.tasks.len();
        self.tasks
            .get(position)
            .ok_or(StoreError::OutOfRange { position, len })
    }

    fn get_mut(&mut self, position: usize) -> Result<&mut Task, StoreError> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(position)
            .ok_or(StoreError::OutOfRange { position, len })
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a new task. Returns its position, or `None` (store unchanged)
    /// when `name` is empty.
    pub fn add(
        &mut self,
        name: &str,
        due_date: Option<NaiveDateTime>,
        estimated_time: Option<f64>,
        priority: Priority,
    ) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(name.to_string(), due_date, estimated_time, priority));
        debug!("added task {:?} at {}", name, self.tasks.len() - 1);
        Some(self.tasks.len() - 1)
    }

    /// Rename the task at `position`. Returns `Ok(false)` without changing
    /// anything when `new_name` is empty.
    pub fn edit_name(&mut self, position: usize, new_name: &str) -> Result<bool, StoreError> {
        let task = self.get_mut(position)?;
        if new_name.is_empty() {
            return Ok(false);
        }
        debug!("renamed task {:?} -> {:?}", task.name, new_name);
        task.name = new_name.to_string();
        Ok(true)
    }

    /// Remove and return the task at `position`, shifting later tasks down.
    pub fn remove(&mut self, position: usize) -> Result<Task, StoreError> {
        self.get(position)?;
        let task = self.tasks.remove(position);
        debug!("removed task {:?} from {}", task.name, position);
        Ok(task)
    }

    /// Flip the completion flag. Returns the new value.
    pub fn toggle_complete(&mut self, position: usize) -> Result<bool, StoreError> {
        let task = self.get_mut(position)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Record now as the start time, replacing any earlier start.
    pub fn start_timer(&mut self, position: usize) -> Result<(), StoreError> {
        self.start_timer_at(position, Local::now())
    }

    pub fn start_timer_at(&mut self, position: usize, at: DateTime<Local>) -> Result<(), StoreError> {
        self.get_mut(position)?.start_timer(at);
        Ok(())
    }

    /// Record now as the end time. Does not require a prior start.
    pub fn stop_timer(&mut self, position: usize) -> Result<(), StoreError> {
        self.stop_timer_at(position, Local::now())
    }

    pub fn stop_timer_at(&mut self, position: usize, at: DateTime<Local>) -> Result<(), StoreError> {
        self.get_mut(position)?.stop_timer(at);
        Ok(())
    }

    /// Reorder the store in place. Ties keep their current relative order.
    pub fn sort(&mut self, key: SortKey) {
        sort_tasks(&mut self.tasks, key);
        debug!("sorted {} tasks by {}", self.tasks.len(), key);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Recorded stop minus recorded start, or zero if either is missing.
    pub fn elapsed_time(&self, position: usize) -> Result<Duration, StoreError> {
        Ok(self.get(position)?.elapsed_time())
    }

    /// Tasks whose name contains `keyword`, ignoring case, in store order.
    pub fn search<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        search::filter_tasks(&self.tasks, keyword).map(|(_, task)| task)
    }

    /// Store positions of the tasks `search` yields.
    pub fn search_positions<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = usize> + 'a {
        search::filter_tasks(&self.tasks, keyword).map(|(position, _)| position)
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Task priority, chosen from the priority dropdown when a task is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// The label shown in the list and the dropdown
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Rank by urgency: High = 0, Medium = 1, Low = 2
    pub fn severity(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// The next priority in dropdown order, wrapping around
    pub fn cycle(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0} (expected High, Medium or Low)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Where a task's timer stands, derived from its recorded timestamps.
/// Purely informational: timer actions are never refused because of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Never started or stopped
    Idle,
    /// Started, and not stopped since
    Running,
    /// Stopped after the last start
    Stopped,
    /// Stopped without ever being started
    Unstarted,
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Task label, never empty
    pub name: String,
    /// Optional deadline, minute granularity as entered
    pub due_date: Option<NaiveDateTime>,
    /// Optional estimate in hours
    pub estimated_time: Option<f64>,
    pub priority: Priority,
    pub completed: bool,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
}

impl Task {
    /// Create an incomplete task with no timer timestamps
    pub fn new(
        name: String,
        due_date: Option<NaiveDateTime>,
        estimated_time: Option<f64>,
        priority: Priority,
    ) -> Self {
        Task {
            name,
            due_date,
            estimated_time,
            priority,
            completed: false,
            start_time: None,
            end_time: None,
        }
    }

    pub fn start_timer(&mut self, at: DateTime<Local>) {
        self.start_time = Some(at);
    }

    pub fn stop_timer(&mut self, at: DateTime<Local>) {
        self.end_time = Some(at);
    }

    /// `end_time - start_time` when both are recorded, zero otherwise.
    /// Negative if the recorded stop precedes the recorded start.
    pub fn elapsed_time(&self) -> chrono::Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end - start,
            _ => chrono::Duration::zero(),
        }
    }

    pub fn timer_state(&self) -> TimerState {
        match (self.start_time, self.end_time) {
            (None, None) => TimerState::Idle,
            (Some(_), None) => TimerState::Running,
            (None, Some(_)) => TimerState::Unstarted,
            (Some(start), Some(end)) if end >= start => TimerState::Stopped,
            (Some(_), Some(_)) => TimerState::Running,
        }
    }
}

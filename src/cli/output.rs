use serde::Serialize;

use crate::control::Row;
use crate::model::task::{Priority, Task, TimerState};
use crate::parse::format_elapsed;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub position: usize,
    pub name: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    pub timer: &'static str,
    pub elapsed: String,
    pub display: String,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn timer_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Stopped => "stopped",
        TimerState::Unstarted => "unstarted",
    }
}

/// `row` is 1-based, as displayed.
pub fn task_to_json(row: usize, task: &Task, display: String) -> TaskJson {
    TaskJson {
        position: row,
        name: task.name.clone(),
        completed: task.completed,
        priority: task.priority,
        due_date: task
            .due_date
            .map(|d| d.format(crate::parse::input_parser::DUE_DATE_FORMAT).to_string()),
        estimated_time: task.estimated_time,
        timer: timer_label(task.timer_state()),
        elapsed: format_elapsed(task.elapsed_time()),
        display,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Numbered list lines: `1. [ ] Name - Priority: Medium`
pub fn format_rows(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| format!("{}. {}", i + 1, row.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_rows_numbered() {
        let rows = vec![
            Row {
                position: 4,
                text: "[ ] a - Priority: Low".into(),
            },
            Row {
                position: 7,
                text: "[X] b - Priority: High".into(),
            },
        ];
        assert_eq!(
            format_rows(&rows),
            vec!["1. [ ] a - Priority: Low", "2. [X] b - Priority: High"]
        );
    }

    #[test]
    fn test_task_json() {
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(9, 5, 0));
        let task = Task::new("Ship".into(), due, None, Priority::High);
        let json = serde_json::to_value(task_to_json(1, &task, "line".into())).unwrap();
        assert_eq!(json["name"], "Ship");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["due_date"], "2024-05-01 09:05");
        assert_eq!(json["timer"], "idle");
        assert_eq!(json["elapsed"], "0:00:00");
        assert!(json.get("estimated_time").is_none());
    }
}

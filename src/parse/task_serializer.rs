use chrono::Duration;

use crate::model::task::Task;

/// Checkbox shown in front of every task line
pub fn checkbox(task: &Task) -> &'static str {
    if task.completed { "[X]" } else { "[ ]" }
}

/// Render a task as its one-line list summary:
/// `[ ] Name - Due: 2024-05-01 14:30:00 - Estimated Time: 2.5 hours - Priority: High`
pub fn format_task(task: &Task) -> String {
    let mut line = format!("{} {}", checkbox(task), task.name);

    if let Some(due) = task.due_date {
        line.push_str(&format!(" - Due: {}", due.format("%Y-%m-%d %H:%M:%S")));
    }

    if let Some(hours) = task.estimated_time {
        line.push_str(&format!(" - Estimated Time: {} hours", format_hours(hours)));
    }

    line.push_str(&format!(" - Priority: {}", task.priority));
    line
}

/// Format an hour count the way it was typed as a decimal: whole numbers
/// keep one fractional digit (`2.0`), everything else uses the shortest
/// exact form (`2.5`, `0.25`).
pub fn format_hours(hours: f64) -> String {
    if hours.is_finite() && hours.fract() == 0.0 && hours.abs() < 1e16 {
        format!("{:.1}", hours)
    } else {
        format!("{}", hours)
    }
}

/// Format an elapsed duration as `H:MM:SS`, with a leading `-` when negative.
/// Fractional seconds are dropped.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// Key the task list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Case-sensitive, ascending
    #[default]
    Name,
    /// Ascending, tasks without a due date last
    DueDate,
    /// Alphabetical on the priority label: High, Low, Medium
    Priority,
    /// By urgency: High, Medium, Low
    PrioritySeverity,
    /// Incomplete before complete
    CompletionStatus,
}

type Comparator = fn(&Task, &Task) -> Ordering;

impl SortKey {
    /// All keys in dropdown order
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::DueDate,
        SortKey::Priority,
        SortKey::PrioritySeverity,
        SortKey::CompletionStatus,
    ];

    /// Label shown in the sort dropdown
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
            SortKey::PrioritySeverity => "Priority (severity)",
            SortKey::CompletionStatus => "Completion Status",
        }
    }

    /// Ordering function for this key
    pub fn comparator(self) -> Comparator {
        match self {
            SortKey::Name => by_name,
            SortKey::DueDate => by_due_date,
            SortKey::Priority => by_priority_label,
            SortKey::PrioritySeverity => by_priority_severity,
            SortKey::CompletionStatus => by_completion,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0} (expected name, due-date, priority, severity or status)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "name" => Ok(SortKey::Name),
            "due" | "duedate" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "severity" | "priorityseverity" => Ok(SortKey::PrioritySeverity),
            "status" | "completion" | "completionstatus" | "completed" => {
                Ok(SortKey::CompletionStatus)
            }
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Stable in-place sort of `tasks` by `key`
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    tasks.sort_by(key.comparator());
}

fn by_name(a: &Task, b: &Task) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_due_date(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_priority_label(a: &Task, b: &Task) -> Ordering {
    a.priority.label().cmp(b.priority.label())
}

fn by_priority_severity(a: &Task, b: &Task) -> Ordering {
    a.priority.severity().cmp(&b.priority.severity())
}

fn by_completion(a: &Task, b: &Task) -> Ordering {
    a.completed.cmp(&b.completed)
}

use regex::{Regex, RegexBuilder};

use crate::model::task::Task;

/// Case-insensitive substring match on the task name. An empty keyword
/// matches every task.
pub fn matches(task: &Task, keyword: &str) -> bool {
    keyword.is_empty() || task.name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Filter `tasks` lazily by `keyword`, yielding `(position, task)` pairs in
/// their original order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    keyword: &'a str,
) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
    tasks
        .iter()
        .enumerate()
        .filter(move |(_, task)| matches(task, keyword))
}

/// Build a case-insensitive regex matching `keyword` literally.
/// Returns `None` for an empty keyword.
pub fn keyword_regex(keyword: &str) -> Option<Regex> {
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .ok()
}

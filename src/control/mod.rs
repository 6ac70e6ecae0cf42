pub mod prompt;

pub use prompt::{Prompter, ScriptedPrompter};

use chrono::{DateTime, Local};
use log::debug;

use crate::model::config::Config;
use crate::model::task::{Priority, Task};
use crate::ops::sort::SortKey;
use crate::ops::task_ops::TaskStore;
use crate::parse::{format_elapsed, format_task, parse_due_date};

/// One visible line of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position of the task in the store
    pub position: usize,
    /// Display projection of the task
    pub text: String,
}

/// What a user action did, for the front end to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (no selection, cancelled or empty input)
    Unchanged,
    /// The list must be redrawn
    Changed,
    /// Show an informational message
    Message { title: String, body: String },
}

type Clock = Box<dyn FnMut() -> DateTime<Local>>;

/// Drives the task store from user actions.
///
/// Each action performs at most one store operation. Input is collected
/// through a [`Prompter`]; the visible list is recomputed from the store by
/// [`Controller::rows`].
pub struct Controller {
    store: TaskStore,
    /// Selected row, as an index into `rows()`
    selected: Option<usize>,
    /// Priority given to newly added tasks
    priority: Priority,
    /// Key shown in the sort dropdown; only applied by `sort`
    sort_key: SortKey,
    /// Active search keyword. The list shows only matches while set.
    filter: Option<String>,
    clock: Clock,
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new(TaskStore::new())
    }
}

impl Controller {
    pub fn new(store: TaskStore) -> Self {
        Controller {
            store,
            selected: None,
            priority: Priority::default(),
            sort_key: SortKey::default(),
            filter: None,
            clock: Box::new(Local::now),
        }
    }

    /// Controller with an empty store and the configured defaults
    pub fn from_config(config: &Config) -> Self {
        let mut controller = Controller::default();
        controller.priority = config.tasks.default_priority;
        controller.sort_key = config.tasks.default_sort;
        controller
    }

    /// Replace the clock used by the timer actions
    pub fn with_clock(mut self, clock: impl FnMut() -> DateTime<Local> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    // -----------------------------------------------------------------------
    // Visible rows and selection
    // -----------------------------------------------------------------------

    /// Store positions of the visible rows, in display order
    pub fn visible_positions(&self) -> Vec<usize> {
        match &self.filter {
            Some(keyword) => self.store.search_positions(keyword).collect(),
            None => (0..self.store.len()).collect(),
        }
    }

    /// The textual projection currently on display
    pub fn rows(&self) -> Vec<Row> {
        self.visible_positions()
            .into_iter()
            .filter_map(|position| {
                self.store.get(position).ok().map(|task| Row {
                    position,
                    text: format_task(task),
                })
            })
            .collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a visible row. Returns false (selection unchanged) if there
    /// is no such row.
    pub fn select(&mut self, row: usize) -> bool {
        if row < self.visible_positions().len() {
            self.selected = Some(row);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn select_next(&mut self) {
        let count = self.visible_positions().len();
        if count == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(row) => (row + 1).min(count - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        let count = self.visible_positions().len();
        if count == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(row) => row.saturating_sub(1).min(count - 1),
            None => 0,
        });
    }

    pub fn select_last(&mut self) {
        let count = self.visible_positions().len();
        self.selected = count.checked_sub(1);
    }

    /// Store position of the selected row
    pub fn selected_position(&self) -> Option<usize> {
        self.visible_positions().get(self.selected?).copied()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.store.get(self.selected_position()?).ok()
    }

    /// Keep the selection on an existing row after the rows changed
    fn clamp_selection(&mut self) {
        let count = self.visible_positions().len();
        self.selected = match (self.selected, count) {
            (_, 0) => None,
            (Some(row), n) => Some(row.min(n - 1)),
            (None, _) => None,
        };
    }

    /// Show the full list again, selecting the task at `position`
    fn show_all(&mut self, position: Option<usize>) {
        self.filter = None;
        self.selected = position;
        self.clamp_selection();
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Ask for a name, due date and estimate, then append the task with the
    /// current priority. Cancelling or leaving the name empty adds nothing.
    pub fn add_task(&mut self, prompter: &mut dyn Prompter) -> Outcome {
        let name = match prompter.ask_text("Add Task", "Enter task name:", None) {
            Some(name) if !name.is_empty() => name,
            _ => return Outcome::Unchanged,
        };

        let due_date = loop {
            let Some(text) =
                prompter.ask_text("Add Task", "Enter due date (YYYY-MM-DD HH:MM):", None)
            else {
                break None;
            };
            match parse_due_date(&text) {
                Ok(due) => break due,
                Err(e) => prompter.reject(&e.to_string()),
            }
        };

        let estimated_time = loop {
            match prompter.ask_float("Add Task", "Enter estimated time (in hours):") {
                Some(hours) if hours < 0.0 => {
                    prompter.reject("Estimated time cannot be negative.")
                }
                other => break other.map(f64::abs),
            }
        };

        match self.store.add(&name, due_date, estimated_time, self.priority) {
            Some(position) => {
                self.show_all(Some(position));
                Outcome::Changed
            }
            None => Outcome::Unchanged,
        }
    }

    /// Rename the selected task, offering its current name for editing.
    pub fn edit_task(&mut self, prompter: &mut dyn Prompter) -> Outcome {
        let Some(position) = self.selected_position() else {
            return Outcome::Unchanged;
        };
        let Ok(current) = self.store.get(position).map(|t| t.name.clone()) else {
            return Outcome::Unchanged;
        };
        let Some(new_name) = prompter.ask_text("Edit Task", "Enter new task name:", Some(&current))
        else {
            return Outcome::Unchanged;
        };
        match self.store.edit_name(position, &new_name) {
            Ok(true) => {
                self.show_all(Some(position));
                Outcome::Changed
            }
            _ => Outcome::Unchanged,
        }
    }

    pub fn delete_task(&mut self) -> Outcome {
        let Some(position) = self.selected_position() else {
            return Outcome::Unchanged;
        };
        match self.store.remove(position) {
            Ok(_) => {
                self.show_all(Some(position));
                Outcome::Changed
            }
            Err(_) => Outcome::Unchanged,
        }
    }

    pub fn complete_task(&mut self) -> Outcome {
        let Some(position) = self.selected_position() else {
            return Outcome::Unchanged;
        };
        match self.store.toggle_complete(position) {
            Ok(_) => {
                self.show_all(Some(position));
                Outcome::Changed
            }
            Err(_) => Outcome::Unchanged,
        }
    }

    pub fn start_timer(&mut self) -> Outcome {
        let Some(position) = self.selected_position() else {
            return Outcome::Unchanged;
        };
        let now = (self.clock)();
        if self.store.start_timer_at(position, now).is_err() {
            return Outcome::Unchanged;
        }
        let name = self.store.get(position).map(|t| t.name.as_str()).unwrap_or("");
        Outcome::Message {
            title: "Timer Started".to_string(),
            body: format!("Timer started for task: {}", name),
        }
    }

    pub fn stop_timer(&mut self) -> Outcome {
        let Some(position) = self.selected_position() else {
            return Outcome::Unchanged;
        };
        let now = (self.clock)();
        if self.store.stop_timer_at(position, now).is_err() {
            return Outcome::Unchanged;
        }
        match self.store.get(position) {
            Ok(task) => Outcome::Message {
                title: "Timer Stopped".to_string(),
                body: format!(
                    "Timer stopped for task: {}\nElapsed Time: {}",
                    task.name,
                    format_elapsed(task.elapsed_time())
                ),
            },
            Err(_) => Outcome::Unchanged,
        }
    }

    /// Show only tasks whose name contains `keyword`. The store is not
    /// touched; an empty keyword shows everything.
    pub fn search(&mut self, keyword: &str) -> Outcome {
        self.filter = if keyword.is_empty() {
            None
        } else {
            Some(keyword.to_string())
        };
        debug!("search filter {:?}", self.filter);
        self.selected = Some(0);
        self.clamp_selection();
        Outcome::Changed
    }

    pub fn clear_search(&mut self) -> Outcome {
        self.search("")
    }

    /// Choose a sort key and reorder the store by it.
    pub fn sort(&mut self, key: SortKey) -> Outcome {
        self.sort_key = key;
        self.store.sort(key);
        self.show_all(Some(0));
        Outcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn add(ctl: &mut Controller, name: &str) {
        let mut p = ScriptedPrompter::new([Some(name), Some(""), Some("")]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Changed);
    }

    fn row_texts(ctl: &Controller) -> Vec<String> {
        ctl.rows().into_iter().map(|r| r.text).collect()
    }

    fn sample() -> Controller {
        let mut ctl = Controller::default();
        add(&mut ctl, "my project");
        add(&mut ctl, "Groceries");
        add(&mut ctl, "Project X");
        ctl
    }

    #[test]
    fn test_add_full_flow() {
        let mut ctl = Controller::default();
        ctl.set_priority(Priority::High);
        let mut p = ScriptedPrompter::new([
            Some("Write report"),
            Some("2024-05-01 14:30"),
            Some("2.5"),
        ]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Changed);
        assert_eq!(
            row_texts(&ctl),
            vec![
                "[ ] Write report - Due: 2024-05-01 14:30:00 - Estimated Time: 2.5 hours - Priority: High"
            ]
        );
        assert_eq!(ctl.selected(), Some(0));
    }

    #[test]
    fn test_add_cancelled_or_empty_name() {
        let mut ctl = Controller::default();
        let mut p = ScriptedPrompter::new([None::<String>]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Unchanged);
        let mut p = ScriptedPrompter::new([Some("")]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Unchanged);
        // Nothing further was asked after the empty name
        assert_eq!(p.asked.len(), 1);
        assert!(ctl.store().is_empty());
    }

    #[test]
    fn test_add_reprompts_bad_due_date() {
        let mut ctl = Controller::default();
        let mut p = ScriptedPrompter::new([
            Some("Pay rent"),
            Some("next friday"),
            Some("2024-06-01 09:00"),
            Some(""),
        ]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Changed);
        assert_eq!(p.rejections.len(), 1);
        assert!(p.rejections[0].contains("next friday"));
        assert!(ctl.store().get(0).unwrap().due_date.is_some());
    }

    #[test]
    fn test_add_cancel_due_date_means_none() {
        let mut ctl = Controller::default();
        let mut p = ScriptedPrompter::new([Some("Call mom"), None, Some("1")]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Changed);
        let task = ctl.store().get(0).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.estimated_time, Some(1.0));
    }

    #[test]
    fn test_add_rejects_negative_estimate() {
        let mut ctl = Controller::default();
        let mut p = ScriptedPrompter::new([Some("Run"), Some(""), Some("-2"), Some("0.5")]);
        ctl.add_task(&mut p);
        assert_eq!(p.rejections.len(), 1);
        assert_eq!(ctl.store().get(0).unwrap().estimated_time, Some(0.5));
    }

    #[test]
    fn test_add_negative_zero_estimate_shows_zero() {
        let mut ctl = Controller::default();
        let mut p = ScriptedPrompter::new([Some("nap"), Some(""), Some("-0")]);
        assert_eq!(ctl.add_task(&mut p), Outcome::Changed);
        assert!(p.rejections.is_empty());
        assert_eq!(
            row_texts(&ctl),
            vec!["[ ] nap - Estimated Time: 0.0 hours - Priority: Medium"]
        );
    }

    #[test]
    fn test_actions_without_selection_are_noops() {
        let mut ctl = sample();
        ctl.clear_selection();
        let mut p = ScriptedPrompter::new([Some("renamed")]);
        assert_eq!(ctl.edit_task(&mut p), Outcome::Unchanged);
        assert_eq!(p.remaining(), 1);
        assert_eq!(ctl.delete_task(), Outcome::Unchanged);
        assert_eq!(ctl.complete_task(), Outcome::Unchanged);
        assert_eq!(ctl.start_timer(), Outcome::Unchanged);
        assert_eq!(ctl.stop_timer(), Outcome::Unchanged);
        assert_eq!(ctl.store().len(), 3);
    }

    #[test]
    fn test_edit_offers_current_name() {
        let mut ctl = sample();
        ctl.select(1);
        let mut p = ScriptedPrompter::new([Some("Groceries and bread")]);
        assert_eq!(ctl.edit_task(&mut p), Outcome::Changed);
        assert_eq!(ctl.store().get(1).unwrap().name, "Groceries and bread");

        let mut p = ScriptedPrompter::new([Some("")]);
        assert_eq!(ctl.edit_task(&mut p), Outcome::Unchanged);
        assert_eq!(ctl.store().get(1).unwrap().name, "Groceries and bread");
    }

    #[test]
    fn test_filtered_selection_acts_on_right_task() {
        let mut ctl = sample();
        ctl.search("proj");
        assert_eq!(
            ctl.rows().iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 2]
        );
        // Second visible row is "Project X" at store position 2
        ctl.select(1);
        assert_eq!(ctl.selected_position(), Some(2));
        assert_eq!(ctl.complete_task(), Outcome::Changed);
        assert!(ctl.store().get(2).unwrap().completed);
        assert!(!ctl.store().get(1).unwrap().completed);
        // Mutation shows the full list again, still on the same task
        assert_eq!(ctl.filter(), None);
        assert_eq!(ctl.selected_position(), Some(2));
    }

    #[test]
    fn test_search_keeps_store() {
        let mut ctl = sample();
        ctl.search("GROC");
        assert_eq!(row_texts(&ctl), vec!["[ ] Groceries - Priority: Medium"]);
        assert_eq!(ctl.store().len(), 3);
        ctl.clear_search();
        assert_eq!(ctl.rows().len(), 3);
    }

    #[test]
    fn test_search_no_matches_clears_selection() {
        let mut ctl = sample();
        ctl.search("zzz");
        assert!(ctl.rows().is_empty());
        assert_eq!(ctl.selected(), None);
        assert_eq!(ctl.delete_task(), Outcome::Unchanged);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut ctl = sample();
        ctl.select(2);
        assert_eq!(ctl.delete_task(), Outcome::Changed);
        assert_eq!(ctl.store().len(), 2);
        assert_eq!(ctl.selected(), Some(1));
        ctl.delete_task();
        ctl.delete_task();
        assert!(ctl.store().is_empty());
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn test_sort_clears_filter() {
        let mut ctl = sample();
        ctl.search("proj");
        ctl.sort(SortKey::Name);
        assert_eq!(ctl.filter(), None);
        assert_eq!(ctl.sort_key(), SortKey::Name);
        let names: Vec<&str> = ctl.store().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Project X", "my project"]);
    }

    #[test]
    fn test_timer_messages() {
        let t0 = Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tick = Rc::new(Cell::new(0i64));
        let clock_tick = Rc::clone(&tick);
        let mut ctl = sample().with_clock(move || t0 + Duration::seconds(clock_tick.get()));
        ctl.select(1);

        assert_eq!(
            ctl.start_timer(),
            Outcome::Message {
                title: "Timer Started".into(),
                body: "Timer started for task: Groceries".into(),
            }
        );
        tick.set(3723);
        assert_eq!(
            ctl.stop_timer(),
            Outcome::Message {
                title: "Timer Stopped".into(),
                body: "Timer stopped for task: Groceries\nElapsed Time: 1:02:03".into(),
            }
        );
        assert_eq!(ctl.store().elapsed_time(1), Ok(Duration::seconds(3723)));
    }

    #[test]
    fn test_selection_movement() {
        let mut ctl = sample();
        ctl.clear_selection();
        ctl.select_next();
        assert_eq!(ctl.selected(), Some(0));
        ctl.select_prev();
        assert_eq!(ctl.selected(), Some(0));
        ctl.select_last();
        assert_eq!(ctl.selected(), Some(2));
        ctl.select_next();
        assert_eq!(ctl.selected(), Some(2));
        assert!(!ctl.select(3));
        assert_eq!(ctl.selected(), Some(2));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.tasks.default_priority = Priority::Low;
        config.tasks.default_sort = SortKey::DueDate;
        let ctl = Controller::from_config(&config);
        assert_eq!(ctl.priority(), Priority::Low);
        assert_eq!(ctl.sort_key(), SortKey::DueDate);
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::task::Priority;
use crate::ops::sort::SortKey;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tasks: TaskConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Priority preselected in the dropdown for new tasks
    #[serde(default)]
    pub default_priority: Priority,
    /// Sort key preselected in the sort dropdown. Not applied until chosen.
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Default for TaskConfig {
    fn default() -> Self {
        TaskConfig {
            default_priority: Priority::Medium,
            default_sort: SortKey::Name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides, e.g. `background = "#001F3F"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

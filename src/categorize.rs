//! Rule-based task categorization.
//!
//! Labels come from keyword rules matched against the task name and its
//! section context. The target list depends only on completion status.

use crate::core::{BoardConfig, CategorizedTask, Task};

/// Labels for a task, in the iteration order of the configured rules.
///
/// A rule matches when any of its keywords is a substring of the lowercased
/// `name section subsection` text. Keywords are expected in lowercase, see
/// [`BoardConfig::normalize_keywords`]. With no match the configured fallback
/// label is returned, so the result is never empty.
pub fn categorize(task: &Task, config: &BoardConfig) -> Vec<String> {
    let text = task.search_text();

    let mut labels: Vec<String> = config
        .categorization_rules
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
        .map(|(label, _)| label.clone())
        .collect();

    if labels.is_empty() {
        labels.push(config.fallback_label.clone());
    }

    labels
}

/// Name of the list a task's card goes into.
pub fn determine_list(task: &Task, config: &BoardConfig) -> String {
    if task.completed {
        config.list_mapping.completed.clone()
    } else {
        config.list_mapping.todo.clone()
    }
}

/// Attach labels and a target list to a task.
pub fn categorize_task(task: Task, config: &BoardConfig) -> CategorizedTask {
    let labels = categorize(&task, config);
    let target_list = determine_list(&task, config);
    CategorizedTask { task, labels, target_list }
}

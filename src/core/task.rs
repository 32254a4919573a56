//! Task records produced by the checklist parser.

use serde::{Deserialize, Serialize};

/// Section title used for tasks that appear before any header.
pub const DEFAULT_SECTION: &str = "General";

/// A markdown header seen while scanning a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Header level (1-6)
    pub level: u8,

    /// Header text with any leading ordinal stripped
    pub title: String,

    /// 1-based line number in the source document
    pub source_line: usize,
}

impl Section {
    /// Whether this header opens a main section (levels 1-3) rather than a subsection.
    pub fn is_main(&self) -> bool {
        self.level <= 3
    }
}

/// A single checklist entry with the section context it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Checklist text after the checkbox
    pub name: String,

    /// Whether the checkbox was ticked
    pub completed: bool,

    /// Nearest main section above the item
    pub section: String,

    /// Nearest subsection above the item (empty if none)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subsection: String,

    /// 1-based line number in the source document
    pub source_line: usize,

    /// The trimmed source line
    pub raw_line: String,
}

impl Task {
    /// Text searched by the categorization rules.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.section, self.subsection).to_lowercase()
    }

    /// Card description: section, optional subsection and source line.
    pub fn description(&self) -> String {
        let mut parts = vec![format!("Section: {}", self.section)];
        if !self.subsection.is_empty() {
            parts.push(format!("Subsection: {}", self.subsection));
        }
        parts.push(format!("Line: {}", self.source_line));
        parts.join("\n")
    }
}

/// A task with its labels and destination list resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTask {
    /// The underlying task
    #[serde(flatten)]
    pub task: Task,

    /// Label names in rule order, never empty
    pub labels: Vec<String>,

    /// Name of the list the card goes into
    pub target_list: String,
}

impl CategorizedTask {
    /// One-line summary used by the dry-run preview.
    pub fn preview_line(&self) -> String {
        let status = if self.task.completed { "[x]" } else { "[ ]" };
        format!(
            "{} {} \u{2192} {} ({})",
            status,
            self.task.name,
            self.target_list,
            self.labels.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(subsection: &str) -> Task {
        Task {
            name: "Install deps".to_string(),
            completed: false,
            section: "Setup".to_string(),
            subsection: subsection.to_string(),
            source_line: 3,
            raw_line: "- [ ] Install deps".to_string(),
        }
    }

    #[test]
    fn test_description_without_subsection() {
        assert_eq!(task("").description(), "Section: Setup\nLine: 3");
    }

    #[test]
    fn test_description_with_subsection() {
        assert_eq!(task("Tooling").description(), "Section: Setup\nSubsection: Tooling\nLine: 3");
    }

    #[test]
    fn test_search_text_is_lowercase() {
        assert_eq!(task("Tooling").search_text(), "install deps setup tooling");
    }

    #[test]
    fn test_preview_line() {
        let categorized = CategorizedTask {
            task: task(""),
            labels: vec!["Setup".to_string(), "Testing".to_string()],
            target_list: "To Do".to_string(),
        };
        assert_eq!(categorized.preview_line(), "[ ] Install deps \u{2192} To Do (Setup, Testing)");
    }

    #[test]
    fn test_section_levels() {
        let main = Section { level: 3, title: "Views".to_string(), source_line: 1 };
        let sub = Section { level: 4, title: "Detail".to_string(), source_line: 2 };
        assert!(main.is_main());
        assert!(!sub.is_main());
    }
}

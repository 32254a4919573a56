//! Board configuration.
//!
//! Handles the built-in label/list/rule defaults and loading overrides
//! from a JSON file. Every key is optional; omitted keys keep their default.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ImportError, ImportResult};

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Labels created on the board, in creation order
    pub labels: Vec<LabelSpec>,

    /// Lists created on the board, in creation order
    pub lists: Vec<ListSpec>,

    /// Label name -> keywords. Iteration order is the order labels are assigned in.
    pub categorization_rules: IndexMap<String, Vec<String>>,

    /// Task status -> list name
    pub list_mapping: ListMapping,

    /// Board name override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_name: Option<String>,

    /// Label applied when no rule matches
    pub fallback_label: String,
}

/// A label to create on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Label name
    pub name: String,

    /// Trello color name (green, yellow, sky, ...)
    pub color: String,
}

/// A list (column) to create on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpec {
    /// List name
    pub name: String,

    /// Position ("top", "bottom" or a positive number)
    #[serde(rename = "pos", deserialize_with = "deserialize_position")]
    pub position: String,
}

/// Accept `pos` as either a string or a bare JSON number.
fn deserialize_position<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Position {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Position::deserialize(deserializer)? {
        Position::Text(text) => text,
        Position::Number(number) => number.to_string(),
    })
}

/// Maps task status to a list name.
///
/// Only `completed` and `todo` are reachable from a markdown checklist,
/// which has no notion of work in progress. `in_progress` and `backlog`
/// are kept so existing configuration files stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMapping {
    pub completed: String,
    pub in_progress: String,
    pub todo: String,
    pub backlog: String,
}

impl Default for ListMapping {
    fn default() -> Self {
        Self {
            completed: "Done".to_string(),
            in_progress: "In Progress".to_string(),
            todo: "To Do".to_string(),
            backlog: "Backlog".to_string(),
        }
    }
}

impl LabelSpec {
    fn new(name: &str, color: &str) -> Self {
        Self { name: name.to_string(), color: color.to_string() }
    }
}

impl ListSpec {
    fn new(name: &str, position: &str) -> Self {
        Self { name: name.to_string(), position: position.to_string() }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let labels = vec![
            LabelSpec::new("Setup", "green"),
            LabelSpec::new("Model", "yellow"),
            LabelSpec::new("View", "orange"),
            LabelSpec::new("Template/Frontend", "purple"),
            LabelSpec::new("Form", "blue"),
            LabelSpec::new("API/DRF", "red"),
            LabelSpec::new("Messaging", "sky"),
            LabelSpec::new("Rating", "pink"),
            LabelSpec::new("Testing", "lime"),
            LabelSpec::new("Optional", "black"),
            LabelSpec::new("Security", "black"),
        ];

        let lists = vec![
            ListSpec::new("Backlog", "top"),
            ListSpec::new("To Do", "bottom"),
            ListSpec::new("In Progress", "bottom"),
            ListSpec::new("Review", "bottom"),
            ListSpec::new("Done", "bottom"),
        ];

        let rules: [(&str, &[&str]); 11] = [
            (
                "Setup",
                &[
                    "setup",
                    "configure",
                    "install",
                    "create initial",
                    "project initialization",
                    "superuser",
                ],
            ),
            ("Model", &["model", "database", "field", "extend user", "signals"]),
            ("View", &["view", "page", "redirect", "navigation", "handler"]),
            (
                "Template/Frontend",
                &[
                    "template",
                    "ui",
                    "design",
                    "styling",
                    "frontend",
                    "responsive",
                    "glassmorphism",
                    "modern",
                    "card",
                    "footer",
                    "header",
                ],
            ),
            ("Form", &["form", "validation", "signup", "login", "logout", "password"]),
            ("API/DRF", &["api", "signals", "auto-creation"]),
            ("Messaging", &["message", "messaging", "contact", "inbox", "conversation"]),
            ("Rating", &["rating", "review", "feedback"]),
            ("Testing", &["test", "testing", "documentation", "unit test"]),
            ("Security", &["security", "password", "auth", "session"]),
            ("Optional", &["optional", "enhancement", "additional", "advanced"]),
        ];

        let categorization_rules = rules
            .iter()
            .map(|(label, keywords)| {
                (label.to_string(), keywords.iter().map(|k| k.to_string()).collect())
            })
            .collect();

        Self {
            labels,
            lists,
            categorization_rules,
            list_mapping: ListMapping::default(),
            board_name: None,
            fallback_label: "Setup".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from an optional path.
    ///
    /// A path that does not exist is not an error: the defaults are used
    /// and a warning is logged. A file that exists but cannot be parsed is.
    pub fn load(path: Option<&Path>) -> ImportResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from_file(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific JSON file.
    pub fn load_from_file(path: &Path) -> ImportResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ImportError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_json(&content)
            .map_err(|source| ImportError::ConfigLoad { path: path.to_path_buf(), source })?;
        config.validate();
        tracing::debug!(path = %path.display(), "Loaded board configuration");
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    ///
    /// Rule keywords are lowercased so matching is case-insensitive.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(content)?;
        config.normalize_keywords();
        Ok(config)
    }

    /// Lowercase every categorization keyword in place.
    pub fn normalize_keywords(&mut self) {
        for keyword in self.categorization_rules.values_mut().flatten() {
            *keyword = keyword.to_lowercase();
        }
    }

    /// Configured board name, ignoring blank values.
    pub fn board_name(&self) -> Option<&str> {
        self.board_name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }

    /// Whether a label with this name will be created on the board.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }

    /// Label names in creation order.
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// List names in creation order.
    pub fn list_names(&self) -> Vec<&str> {
        self.lists.iter().map(|l| l.name.as_str()).collect()
    }

    /// Log mismatches that would leave cards without a label or list.
    fn validate(&self) {
        if !self.has_label(&self.fallback_label) {
            tracing::warn!(
                fallback = %self.fallback_label,
                "Fallback label is not among the configured labels"
            );
        }

        for target in [&self.list_mapping.completed, &self.list_mapping.todo] {
            if !self.lists.iter().any(|l| &l.name == target) {
                tracing::warn!(list = %target, "Mapped list is not among the configured lists");
            }
        }
    }
}

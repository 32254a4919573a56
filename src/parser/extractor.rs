//! Task extraction from scanner events.
//!
//! Tracks the current section and subsection while walking the event
//! stream, builds a [`Task`] for every checklist item and drops items
//! that look like duplicates of an earlier one.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::scanner::{scan, ScanEvent};
use crate::core::{Section, Task, DEFAULT_SECTION};
use crate::error::{ImportError, ImportResult};

/// Names must be longer than this before word overlap counts as a duplicate.
const SIMILARITY_MIN_CHARS: usize = 10;

/// Shared words needed for two long names to count as duplicates.
const SIMILARITY_MIN_SHARED_WORDS: usize = 3;

/// Everything extracted from one markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Text of the first `# ` header, if any
    pub title: Option<String>,

    /// Every header in document order
    pub sections: Vec<Section>,

    /// Accepted tasks in first-occurrence order
    pub tasks: Vec<Task>,
}

impl ParsedDocument {
    /// Number of ticked tasks.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Number of unticked tasks.
    pub fn incomplete_count(&self) -> usize {
        self.tasks.len() - self.completed_count()
    }
}

/// Build a [`ParsedDocument`] from a stream of scanner events.
pub fn extract(events: impl IntoIterator<Item = ScanEvent>) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    let mut current_section = DEFAULT_SECTION.to_string();
    let mut current_subsection = String::new();

    for event in events {
        match event {
            ScanEvent::Title { text, .. } => {
                doc.title = Some(text);
            }
            ScanEvent::Header { level, title, line } => {
                let section = Section { level, title, source_line: line };
                if section.is_main() {
                    current_section = section.title.clone();
                    current_subsection.clear();
                } else {
                    current_subsection = section.title.clone();
                }
                doc.sections.push(section);
            }
            ScanEvent::ChecklistItem { checked, text, line, raw_line } => {
                if is_duplicate(&text, &doc.tasks) {
                    tracing::debug!(line, task = %text, "Skipping duplicate task");
                    continue;
                }
                doc.tasks.push(Task {
                    name: text,
                    completed: checked,
                    section: current_section.clone(),
                    subsection: current_subsection.clone(),
                    source_line: line,
                    raw_line,
                });
            }
            ScanEvent::Ignored { .. } => {}
        }
    }

    doc
}

/// Parse markdown text into a [`ParsedDocument`].
pub fn parse_document(content: &str) -> ParsedDocument {
    extract(scan(content))
}

/// Read and parse a markdown file.
pub fn load_document(path: &Path) -> ImportResult<ParsedDocument> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|source| ImportError::Io { path: path.to_path_buf(), source })?;

    let doc = parse_document(&content);
    tracing::debug!(
        path = %path.display(),
        tasks = doc.tasks.len(),
        sections = doc.sections.len(),
        "Parsed checklist"
    );
    Ok(doc)
}

/// Whether `name` matches an already accepted task.
///
/// Exact matches are compared case-insensitively. Two names longer than
/// ten characters that share three or more words also count, which can
/// reject tasks that are merely similar.
pub fn is_duplicate(name: &str, existing: &[Task]) -> bool {
    let candidate = name.to_lowercase();
    let candidate_long = candidate.chars().count() > SIMILARITY_MIN_CHARS;
    let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();

    existing.iter().any(|task| {
        let other = task.name.to_lowercase();
        if candidate == other {
            return true;
        }

        if !candidate_long || other.chars().count() <= SIMILARITY_MIN_CHARS {
            return false;
        }

        let other_words: HashSet<&str> = other.split_whitespace().collect();
        other_words.intersection(&candidate_words).count() >= SIMILARITY_MIN_SHARED_WORDS
    })
}

//! Line-oriented markdown scanner.
//!
//! Turns raw text into a stream of [`ScanEvent`]s, one per physical line.
//! Only the structure needed for checklist extraction is recognized:
//! the document title, headers and `- [ ]` / `- [x]` items.

use std::str::Lines;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid header regex"));

static ORDINAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.?\s*").expect("valid ordinal regex"));

static CHECKLIST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s*\[([ xX])\]\s*(.+)$").expect("valid checklist regex"));

/// A structural event produced for one line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The first `# ` header in the document.
    ///
    /// Earlier `##`..`######` headers do not prevent it; `## Intro` followed
    /// by `# Project` still yields `Project` as the title.
    Title { text: String, line: usize },

    /// Any other header.
    Header { level: u8, title: String, line: usize },

    /// A checklist item.
    ChecklistItem { checked: bool, text: String, line: usize, raw_line: String },

    /// A line with no structural meaning.
    Ignored { line: usize },
}

/// Iterator over the [`ScanEvent`]s of a document.
#[derive(Debug)]
pub struct DocumentScanner<'a> {
    lines: Lines<'a>,
    line_number: usize,
    title_seen: bool,
}

impl<'a> DocumentScanner<'a> {
    /// Create a scanner over raw markdown text.
    pub fn new(content: &'a str) -> Self {
        Self { lines: content.lines(), line_number: 0, title_seen: false }
    }

    fn classify(&mut self, raw: &str) -> ScanEvent {
        let line = self.line_number;
        let trimmed = raw.trim();

        if !self.title_seen {
            if let Some(text) = trimmed.strip_prefix("# ") {
                self.title_seen = true;
                return ScanEvent::Title { text: text.trim().to_string(), line };
            }
        }

        if let Some(caps) = HEADER_PATTERN.captures(trimmed) {
            let level = caps[1].len() as u8;
            let title = ORDINAL_PATTERN.replace(caps[2].trim(), "").trim().to_string();
            return ScanEvent::Header { level, title, line };
        }

        if let Some(caps) = CHECKLIST_PATTERN.captures(trimmed) {
            return ScanEvent::ChecklistItem {
                checked: caps[1].eq_ignore_ascii_case("x"),
                text: caps[2].trim().to_string(),
                line,
                raw_line: trimmed.to_string(),
            };
        }

        ScanEvent::Ignored { line }
    }
}

impl Iterator for DocumentScanner<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.lines.next()?;
        self.line_number += 1;
        Some(self.classify(raw))
    }
}

/// Scan a document into structural events.
pub fn scan(content: &str) -> DocumentScanner<'_> {
    DocumentScanner::new(content)
}

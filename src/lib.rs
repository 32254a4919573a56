//! # Checkboard
//!
//! Turn a markdown checklist into a categorized Trello board.
//!
//! Checkboard reads a project plan written as markdown headers and
//! `- [ ]` / `- [x]` items, works out which section each task belongs to,
//! drops near-duplicate entries, tags every task with labels from keyword
//! rules and routes it to a list by completion status.
//!
//! ## Pipeline
//!
//! - **Scan**: classify each line as title, header or checklist item ([`parser::scanner`])
//! - **Extract**: build tasks with section context and deduplicate ([`parser::extractor`])
//! - **Categorize**: assign labels and a target list ([`categorize`])
//! - **Import**: preview, or create the board through a [`TicketingBoard`] ([`pipeline`])
//!
//! ## Quick Start
//!
//! ```bash
//! # Preview without touching Trello
//! checkboard --file project_plan.md --dry-run
//!
//! # Create the board
//! export TRELLO_KEY=... TRELLO_TOKEN=...
//! checkboard --file project_plan.md --board-name "Sprint 1"
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod categorize;
pub mod core;
pub mod error;
pub mod integrations;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use categorize::{categorize, categorize_task, determine_list};
pub use core::{BoardConfig, CategorizedTask, LabelSpec, ListMapping, ListSpec, Section, Task};
pub use error::{ImportError, ImportResult};
pub use integrations::{Credentials, TicketingBoard, TrelloClient, TrelloError};
pub use parser::{load_document, parse_document, ParsedDocument, ScanEvent};
pub use pipeline::{
    execute_import, plan_import, render_preview, resolve_board_name, ImportPlan, ImportSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

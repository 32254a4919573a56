//! Import pipeline.
//!
//! Ties the stages together: a parsed document is categorized into an
//! [`ImportPlan`], which is either rendered as a dry-run preview or pushed
//! to a [`TicketingBoard`] one card at a time.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::categorize::categorize_task;
use crate::core::{BoardConfig, CategorizedTask};
use crate::error::{ImportError, ImportResult};
use crate::integrations::TicketingBoard;
use crate::parser::ParsedDocument;

/// Number of tasks listed in the dry-run preview.
pub const PREVIEW_LIMIT: usize = 5;

/// Everything needed to create a board from one document.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    /// Resolved board name
    pub board_name: String,

    /// Categorized tasks in document order
    pub tasks: Vec<CategorizedTask>,

    /// Number of headers in the document
    pub section_count: usize,

    /// Number of ticked tasks
    pub completed: usize,

    /// Number of unticked tasks
    pub incomplete: usize,
}

/// Outcome of pushing a plan to a ticketing board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Cards created
    pub created: usize,

    /// Cards that could not be created
    pub failed: usize,
}

/// Pick the board name.
///
/// Priority: explicit name, then the configured `board_name`, then the
/// document title, then a name derived from the file name. Blank values
/// are skipped.
pub fn resolve_board_name(
    explicit: Option<&str>,
    config: &BoardConfig,
    title: Option<&str>,
    file: &Path,
) -> String {
    non_blank(explicit)
        .or_else(|| config.board_name())
        .or_else(|| non_blank(title))
        .map(str::to_string)
        .unwrap_or_else(|| {
            let file_name =
                file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            format!("Project ({file_name})")
        })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Categorize a parsed document into an import plan.
pub fn plan_import(
    doc: ParsedDocument,
    config: &BoardConfig,
    explicit_name: Option<&str>,
    file: &Path,
) -> ImportPlan {
    let board_name = resolve_board_name(explicit_name, config, doc.title.as_deref(), file);
    let completed = doc.completed_count();
    let incomplete = doc.incomplete_count();
    let section_count = doc.sections.len();

    let tasks = doc.tasks.into_iter().map(|task| categorize_task(task, config)).collect();

    ImportPlan { board_name, tasks, section_count, completed, incomplete }
}

/// Human-readable dry-run preview.
pub fn render_preview(plan: &ImportPlan, config: &BoardConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "[DRY RUN] Would create board: '{}'", plan.board_name);
    let _ = writeln!(out, "Labels: {}", config.label_names().join(", "));
    let _ = writeln!(out, "Lists: {}", config.list_names().join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Tasks breakdown:");
    let _ = writeln!(out, "Completed: {}", plan.completed);
    let _ = writeln!(out, "Incomplete: {}", plan.incomplete);

    for task in plan.tasks.iter().take(PREVIEW_LIMIT) {
        let _ = writeln!(out, "  {}", task.preview_line());
    }

    if plan.tasks.len() > PREVIEW_LIMIT {
        let _ = writeln!(out, "  ... and {} more tasks", plan.tasks.len() - PREVIEW_LIMIT);
    }

    out
}

/// Create the board, its labels and lists, then one card per task.
///
/// Board and label failures abort the import. A card whose list is
/// missing or whose request fails is counted and skipped.
pub fn execute_import<B: TicketingBoard>(
    plan: &ImportPlan,
    config: &BoardConfig,
    board: &mut B,
) -> ImportResult<ImportSummary> {
    tracing::info!(board = %plan.board_name, "Creating board");
    let board_id = board.create_board(&plan.board_name).map_err(Into::<ImportError>::into)?;

    tracing::info!(count = config.labels.len(), "Creating labels");
    let label_map =
        board.create_labels(&board_id, &config.labels).map_err(Into::<ImportError>::into)?;

    tracing::info!(count = config.lists.len(), "Creating lists");
    let list_map =
        board.create_lists(&board_id, &config.lists).map_err(Into::<ImportError>::into)?;

    let mut summary = ImportSummary::default();

    for item in &plan.tasks {
        let Some(list_id) = list_map.get(&item.target_list) else {
            tracing::warn!(
                list = %item.target_list,
                task = %item.task.name,
                "List not found for task"
            );
            summary.failed += 1;
            continue;
        };

        let label_ids: Vec<String> =
            item.labels.iter().filter_map(|name| label_map.get(name).cloned()).collect();

        if board.create_card(list_id, &item.task.name, &label_ids, &item.task.description()) {
            summary.created += 1;
        } else {
            tracing::warn!(task = %item.task.name, "Failed to create card");
            summary.failed += 1;
        }
    }

    tracing::info!(created = summary.created, failed = summary.failed, "Import finished");
    Ok(summary)
}

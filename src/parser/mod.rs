//! Markdown checklist parsing.
//!
//! Parsing happens in two stages: the [`scanner`] classifies each line,
//! and the [`extractor`] turns those events into tasks with their
//! section context.

pub mod extractor;
pub mod scanner;

pub use extractor::{extract, is_duplicate, load_document, parse_document, ParsedDocument};
pub use scanner::{scan, DocumentScanner, ScanEvent};

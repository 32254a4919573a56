//! Core types for checkboard.
//!
//! This module contains the data structures shared by every pipeline
//! stage: task records and the board configuration.

mod config;
mod task;

pub use config::{BoardConfig, LabelSpec, ListMapping, ListSpec};
pub use task::{CategorizedTask, Section, Task, DEFAULT_SECTION};

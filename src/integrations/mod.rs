//! External integrations module.
//!
//! The import pipeline only talks to a ticketing service through the
//! [`TicketingBoard`] trait. [`TrelloClient`] is the implementation used
//! by the CLI.

pub mod trello;

use std::collections::HashMap;

use crate::core::{LabelSpec, ListSpec};

pub use trello::{Credentials, TrelloClient, TrelloError, TrelloResult};

/// Operations the import pipeline needs from a ticketing service.
pub trait TicketingBoard {
    /// Error type for board and label setup.
    type Error: Into<crate::error::ImportError>;

    /// Create a board and clear any lists the provider adds by default.
    fn create_board(&mut self, name: &str) -> Result<String, Self::Error>;

    /// Create labels, returning label name -> id.
    fn create_labels(
        &mut self,
        board_id: &str,
        labels: &[LabelSpec],
    ) -> Result<HashMap<String, String>, Self::Error>;

    /// Create lists, returning list name -> id for the ones that succeeded.
    fn create_lists(
        &mut self,
        board_id: &str,
        lists: &[ListSpec],
    ) -> Result<HashMap<String, String>, Self::Error>;

    /// Create a card. Returns whether the service accepted it.
    fn create_card(
        &mut self,
        list_id: &str,
        name: &str,
        label_ids: &[String],
        description: &str,
    ) -> bool;
}

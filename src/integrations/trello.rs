//! Trello integration.
//!
//! A small blocking client over Trello's REST API covering what the
//! checklist import needs: boards, labels, lists and cards.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::TicketingBoard;
use crate::core::{LabelSpec, ListSpec};
use crate::error::ImportError;

/// Default Trello API base URL.
pub const TRELLO_API_BASE: &str = "https://api.trello.com/1";

/// Lists Trello adds to every new board.
const DEFAULT_LIST_NAMES: [&str; 3] = ["To Do", "Doing", "Done"];

/// Result type for Trello operations.
pub type TrelloResult<T> = Result<T, TrelloError>;

/// Error types for Trello operations.
#[derive(Debug, thiserror::Error)]
pub enum TrelloError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Trello API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    #[error("Authentication failed, check TRELLO_KEY and TRELLO_TOKEN")]
    Unauthorized,

    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Trello API key and token. Zeroed on drop and redacted in debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    key: String,
    token: String,
}

impl Credentials {
    /// Create credentials from a key and token.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self { key: key.into(), token: token.into() }
    }

    /// Read `TRELLO_KEY` and `TRELLO_TOKEN` from the environment.
    pub fn from_env() -> Result<Self, ImportError> {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        match (read("TRELLO_KEY"), read("TRELLO_TOKEN")) {
            (Some(key), Some(token)) => Ok(Self::new(key, token)),
            _ => Err(ImportError::Configuration(
                "Missing Trello API credentials.\n\n\
                 To fix this:\n\
                 1. Go to https://trello.com/app-key and copy your API key\n\
                 2. Generate a token on the same page\n\
                 3. Set TRELLO_KEY and TRELLO_TOKEN (or add them to a .env file)\n\
                 4. Run the import again\n\n\
                 Use --dry-run to preview without credentials."
                    .to_string(),
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// A board, list or label as returned by Trello.
#[derive(Debug, Clone, Deserialize)]
struct TrelloObject {
    id: String,
    #[serde(default)]
    name: String,
}

/// Trello API client.
pub struct TrelloClient {
    /// API base URL
    base_url: String,

    /// API key and token
    credentials: Credentials,

    /// HTTP client
    client: reqwest::blocking::Client,
}

impl TrelloClient {
    /// Create a new Trello client.
    pub fn new(credentials: Credentials) -> TrelloResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("checkboard/{}", crate::VERSION))
            .build()?;

        Ok(Self { base_url: TRELLO_API_BASE.to_string(), credentials, client })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authenticated request.
    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Accept", "application/json")
            .query(&[
                ("key", self.credentials.key.as_str()),
                ("token", self.credentials.token.as_str()),
            ])
            .query(params)
    }

    /// Handle API response.
    fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::blocking::Response,
    ) -> TrelloResult<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json()?);
        }

        match status.as_u16() {
            401 => Err(TrelloError::Unauthorized),
            429 => Err(TrelloError::RateLimited),
            code => {
                let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
                Err(TrelloError::Api { status: code, message })
            }
        }
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> TrelloResult<T> {
        let response = self.request(reqwest::Method::POST, path, params).send()?;
        self.handle_response(response)
    }

    /// Lists currently open on a board.
    fn board_lists(&self, board_id: &str) -> TrelloResult<Vec<TrelloObject>> {
        let response =
            self.request(reqwest::Method::GET, &format!("/boards/{board_id}/lists"), &[]).send()?;
        self.handle_response(response)
    }

    /// Archive a list.
    fn archive_list(&self, list_id: &str) -> TrelloResult<()> {
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/lists/{list_id}/closed"),
                &[("value", "true")],
            )
            .send()?;
        self.handle_response::<serde_json::Value>(response).map(|_| ())
    }

    /// Archive the lists Trello creates on every new board.
    fn remove_default_lists(&self, board_id: &str) -> TrelloResult<()> {
        for list in self.board_lists(board_id)? {
            if !DEFAULT_LIST_NAMES.contains(&list.name.as_str()) {
                continue;
            }
            match self.archive_list(&list.id) {
                Ok(()) => tracing::debug!(list = %list.name, "Archived default list"),
                Err(e) => {
                    tracing::warn!(list = %list.name, error = %e, "Could not remove default list");
                }
            }
        }
        Ok(())
    }
}

impl TicketingBoard for TrelloClient {
    type Error = TrelloError;

    fn create_board(&mut self, name: &str) -> TrelloResult<String> {
        let board: TrelloObject = self.post("/boards", &[("name", name)])?;
        self.remove_default_lists(&board.id)?;
        Ok(board.id)
    }

    fn create_labels(
        &mut self,
        board_id: &str,
        labels: &[LabelSpec],
    ) -> TrelloResult<HashMap<String, String>> {
        let mut label_map = HashMap::new();
        for label in labels {
            let created: TrelloObject = self.post(
                "/labels",
                &[
                    ("idBoard", board_id),
                    ("name", label.name.as_str()),
                    ("color", label.color.as_str()),
                ],
            )?;
            label_map.insert(label.name.clone(), created.id);
        }
        Ok(label_map)
    }

    fn create_lists(
        &mut self,
        board_id: &str,
        lists: &[ListSpec],
    ) -> TrelloResult<HashMap<String, String>> {
        let mut list_map = HashMap::new();
        for list in lists {
            let result: TrelloResult<TrelloObject> = self.post(
                "/lists",
                &[
                    ("idBoard", board_id),
                    ("name", list.name.as_str()),
                    ("pos", list.position.as_str()),
                ],
            );
            match result {
                Ok(created) => {
                    tracing::debug!(list = %list.name, "Created list");
                    list_map.insert(list.name.clone(), created.id);
                }
                Err(e) => {
                    tracing::warn!(list = %list.name, error = %e, "Failed to create list");
                }
            }
        }
        Ok(list_map)
    }

    fn create_card(
        &mut self,
        list_id: &str,
        name: &str,
        label_ids: &[String],
        description: &str,
    ) -> bool {
        let label_ids = label_ids.join(",");
        let result: TrelloResult<serde_json::Value> = self.post(
            "/cards",
            &[
                ("idList", list_id),
                ("name", name),
                ("idLabels", label_ids.as_str()),
                ("desc", description),
            ],
        );
        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(card = %name, error = %e, "Card request failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set_or_remove(name: &str, value: Option<&str>) {
        match value {
            Some(v) => std::env::set_var(name, v),
            None => std::env::remove_var(name),
        }
    }

    fn with_env(key: Option<&str>, token: Option<&str>, f: impl FnOnce()) {
        let original = (std::env::var("TRELLO_KEY").ok(), std::env::var("TRELLO_TOKEN").ok());

        set_or_remove("TRELLO_KEY", key);
        set_or_remove("TRELLO_TOKEN", token);
        f();
        set_or_remove("TRELLO_KEY", original.0.as_deref());
        set_or_remove("TRELLO_TOKEN", original.1.as_deref());
    }

    #[test]
    #[serial(trello_env)]
    fn test_credentials_from_env() {
        with_env(Some("abc"), Some("def"), || {
            let creds = Credentials::from_env().unwrap();
            assert_eq!(creds.key, "abc");
            assert_eq!(creds.token, "def");
        });
    }

    #[test]
    #[serial(trello_env)]
    fn test_credentials_missing_token() {
        with_env(Some("abc"), None, || {
            let err = Credentials::from_env().unwrap_err();
            assert!(matches!(err, ImportError::Configuration(_)));
            assert!(err.to_string().contains("TRELLO_TOKEN"));
        });
    }

    #[test]
    #[serial(trello_env)]
    fn test_credentials_blank_is_missing() {
        with_env(Some("  "), Some("def"), || {
            assert!(Credentials::from_env().is_err());
        });
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("secret-key", "secret-token");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TrelloClient::new(Credentials::new("k", "t"))
            .unwrap()
            .with_base_url("http://localhost:1234/");
        assert_eq!(client.url("/boards"), "http://localhost:1234/boards");
    }
}

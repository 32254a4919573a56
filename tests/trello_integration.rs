//! Trello client tests against a mock HTTP server.

use checkboard::{
    Credentials, LabelSpec, ListSpec, TicketingBoard, TrelloClient, TrelloError, VERSION,
};
use mockito::Matcher;

fn client(server: &mockito::ServerGuard) -> TrelloClient {
    TrelloClient::new(Credentials::new("test-key", "test-token"))
        .unwrap()
        .with_base_url(server.url())
}

fn param(name: &str, value: &str) -> Matcher {
    Matcher::UrlEncoded(name.to_string(), value.to_string())
}

#[test]
fn test_create_board_archives_default_lists() {
    let mut server = mockito::Server::new();

    let board = server
        .mock("POST", "/boards")
        .match_query(Matcher::AllOf(vec![
            param("key", "test-key"),
            param("token", "test-token"),
            param("name", "Proj"),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "board-1", "name": "Proj"}"#)
        .create();

    let lists = server
        .mock("GET", "/boards/board-1/lists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "l1", "name": "To Do"}, {"id": "l2", "name": "Custom"}, {"id": "l3", "name": "Done"}]"#,
        )
        .create();

    let archive_todo = server
        .mock("PUT", "/lists/l1/closed")
        .match_query(param("value", "true"))
        .with_status(200)
        .with_body(r#"{"id": "l1", "closed": true}"#)
        .create();
    let archive_done = server
        .mock("PUT", "/lists/l3/closed")
        .match_query(param("value", "true"))
        .with_status(200)
        .with_body(r#"{"id": "l3", "closed": true}"#)
        .create();
    let archive_custom =
        server.mock("PUT", "/lists/l2/closed").match_query(Matcher::Any).expect(0).create();

    let board_id = client(&server).create_board("Proj").unwrap();

    assert_eq!(board_id, "board-1");
    board.assert();
    lists.assert();
    archive_todo.assert();
    archive_done.assert();
    archive_custom.assert();
}

#[test]
fn test_create_board_unauthorized() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/boards").match_query(Matcher::Any).with_status(401).create();

    let err = client(&server).create_board("Proj").unwrap_err();
    assert!(matches!(err, TrelloError::Unauthorized));
}

#[test]
fn test_create_labels() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/labels")
        .match_query(Matcher::AllOf(vec![
            param("idBoard", "board-1"),
            param("name", "Setup"),
            param("color", "green"),
        ]))
        .with_status(200)
        .with_body(r#"{"id": "label-1", "name": "Setup"}"#)
        .create();

    let labels = vec![LabelSpec { name: "Setup".to_string(), color: "green".to_string() }];
    let map = client(&server).create_labels("board-1", &labels).unwrap();

    assert_eq!(map.get("Setup").map(String::as_str), Some("label-1"));
}

#[test]
fn test_create_lists_skips_failures() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/lists")
        .match_query(Matcher::AllOf(vec![param("name", "Backlog"), param("pos", "top")]))
        .with_status(200)
        .with_body(r#"{"id": "list-1", "name": "Backlog"}"#)
        .create();
    server
        .mock("POST", "/lists")
        .match_query(param("name", "Broken"))
        .with_status(400)
        .with_body("invalid value for pos")
        .create();

    let lists = vec![
        ListSpec { name: "Backlog".to_string(), position: "top".to_string() },
        ListSpec { name: "Broken".to_string(), position: "sideways".to_string() },
    ];
    let map = client(&server).create_lists("board-1", &lists).unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("Backlog").map(String::as_str), Some("list-1"));
}

#[test]
fn test_create_card() {
    let mut server = mockito::Server::new();
    let card = server
        .mock("POST", "/cards")
        .match_query(Matcher::AllOf(vec![
            param("idList", "list-1"),
            param("name", "Install deps"),
            param("idLabels", "label-1,label-2"),
            param("desc", "Section: Setup\nLine: 3"),
        ]))
        .with_status(200)
        .with_body(r#"{"id": "card-1"}"#)
        .create();

    let labels = vec!["label-1".to_string(), "label-2".to_string()];
    let ok =
        client(&server).create_card("list-1", "Install deps", &labels, "Section: Setup\nLine: 3");

    assert!(ok);
    card.assert();
}

#[test]
fn test_create_card_failure() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/cards").match_query(Matcher::Any).with_status(500).create();

    let ok = client(&server).create_card("list-1", "Install deps", &[], "");
    assert!(!ok);
}

#[test]
fn test_requests_carry_user_agent() {
    let mut server = mockito::Server::new();
    let card = server
        .mock("POST", "/cards")
        .match_query(Matcher::Any)
        .match_header("user-agent", format!("checkboard/{VERSION}").as_str())
        .with_status(200)
        .with_body(r#"{"id": "card-1"}"#)
        .create();

    assert!(client(&server).create_card("list-1", "Install deps", &[], ""));
    card.assert();
}

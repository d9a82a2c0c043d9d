//! Integration tests for presence aggregation over HTTP.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{Identity, TestApp};

#[tokio::test]
async fn test_named_viewer_sees_only_others() {
    let app = TestApp::new();
    let alice = Identity::User(app.register_user("alice"));
    let bob = Identity::User(app.register_user("bob"));

    app.heartbeat(&alice, "forum/3").await;
    app.heartbeat(&bob, "forum/3").await;

    let data = app.snapshot(&alice, "forum/3").await;
    let viewers: Vec<&str> = data["viewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    // Self first, then other named viewers.
    assert_eq!(viewers, vec!["alice", "bob"]);
    assert_eq!(data["anonymous"], 0);
    assert_eq!(data["guests"], 0);
}

#[tokio::test]
async fn test_section_prefix_aggregation() {
    let app = TestApp::new();
    let viewer = Identity::User(app.register_user("viewer"));
    let in_thread = Identity::User(app.register_user("reader"));
    let elsewhere = Identity::User(app.register_user("stranger"));

    app.heartbeat(&in_thread, "forum/3/thread/9").await;
    app.heartbeat(&elsewhere, "forum/4").await;

    let data = app.snapshot(&viewer, "forum/3").await;
    let viewers = data["viewers"].as_array().unwrap();

    assert_eq!(viewers.len(), 2);
    assert_eq!(viewers[0], "viewer");
    assert_eq!(viewers[1], "reader");
}

#[tokio::test]
async fn test_anonymous_requester_counted_not_listed() {
    let app = TestApp::new();
    let anon = Identity::Anonymous(app.register_user("shy"));
    let other = Identity::User(app.register_user("open"));

    app.heartbeat(&anon, "forum/1").await;
    app.heartbeat(&other, "forum/1").await;

    // The anonymous requester counts itself and never appears by name.
    let data = app.snapshot(&anon, "forum/1").await;
    assert_eq!(data["viewers"].as_array().unwrap().len(), 1);
    assert_eq!(data["viewers"][0], "open");
    assert_eq!(data["anonymous"], 1);

    // A named viewer does not see the anonymous bump for itself.
    let data = app.snapshot(&other, "forum/1").await;
    assert_eq!(data["anonymous"], 1);
}

#[tokio::test]
async fn test_guest_requester_counts_itself() {
    let app = TestApp::new();
    let guest = Identity::Guest(Uuid::new_v4());

    let data = app.snapshot(&guest, "forum/2").await;
    assert_eq!(data["guests"], 1);
    assert!(data["viewers"].as_array().unwrap().is_empty());

    // A second guest heartbeat adds to the count.
    let other_guest = Identity::Guest(Uuid::new_v4());
    app.heartbeat(&other_guest, "forum/2").await;

    let data = app.snapshot(&guest, "forum/2").await;
    assert_eq!(data["guests"], 2);
}

#[tokio::test]
async fn test_repeat_heartbeat_moves_subject() {
    let app = TestApp::new();
    let watcher = Identity::User(app.register_user("watcher"));
    let mover = Identity::User(app.register_user("mover"));

    app.heartbeat(&mover, "forum/3").await;
    app.heartbeat(&mover, "forum/7").await;

    let data = app.snapshot(&watcher, "forum/3").await;
    assert_eq!(data["viewers"].as_array().unwrap().len(), 1);

    let data = app.snapshot(&watcher, "forum/7").await;
    assert_eq!(data["viewers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_user_falls_back_to_uuid_tag() {
    let app = TestApp::new();
    let unknown = Uuid::new_v4();
    let viewer = Identity::User(app.register_user("viewer"));

    app.heartbeat(&Identity::User(unknown), "forum/5").await;

    let data = app.snapshot(&viewer, "forum/5").await;
    assert_eq!(data["viewers"][1], unknown.to_string());
}

#[tokio::test]
async fn test_missing_identity_headers_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/presence?section=forum/1", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["cache"], true);
}

//! Integration tests for the subscription lifecycle over HTTP.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{Identity, TestApp};

#[tokio::test]
async fn test_subscribe_then_activity_then_visit() {
    let app = TestApp::new();
    let reader = app.register_user("reader");
    let poster = app.register_user("poster");
    let thread = Uuid::new_v4();

    app.subscribe(reader, thread).await;
    assert!(!app.has_unseen(reader).await);

    // New content flips the subscription to unseen.
    let response = app
        .request(
            "POST",
            &format!("/api/threads/{thread}/activity"),
            Some(serde_json::json!({ "poster": poster })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["affected"], 1);
    assert!(app.has_unseen(reader).await);

    // Visiting the thread marks it seen again.
    let response = app
        .request(
            "POST",
            &format!("/api/subscriptions/{thread}/seen"),
            None,
            Some(&Identity::User(reader)),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(!app.has_unseen(reader).await);
}

#[tokio::test]
async fn test_poster_own_subscription_untouched() {
    let app = TestApp::new();
    let poster = app.register_user("poster");
    let reader = app.register_user("reader");
    let thread = Uuid::new_v4();

    app.subscribe(poster, thread).await;
    app.subscribe(reader, thread).await;

    let response = app
        .request(
            "POST",
            &format!("/api/threads/{thread}/activity"),
            Some(serde_json::json!({ "poster": poster })),
            None,
        )
        .await;
    assert_eq!(response.body["data"]["affected"], 1);

    assert!(!app.has_unseen(poster).await);
    assert!(app.has_unseen(reader).await);
}

#[tokio::test]
async fn test_duplicate_subscribe_conflicts() {
    let app = TestApp::new();
    let user = app.register_user("user");
    let thread = Uuid::new_v4();

    app.subscribe(user, thread).await;

    let response = app
        .request(
            "POST",
            &format!("/api/subscriptions/{thread}"),
            None,
            Some(&Identity::User(user)),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_batch_unsubscribe_reports_missing_ids() {
    let app = TestApp::new();
    let user = app.register_user("user");
    let kept = Uuid::new_v4();
    let removed_a = Uuid::new_v4();
    let removed_b = Uuid::new_v4();
    let never_subscribed = Uuid::new_v4();

    for thread in [kept, removed_a, removed_b] {
        app.subscribe(user, thread).await;
    }

    let response = app
        .request(
            "DELETE",
            "/api/subscriptions",
            Some(serde_json::json!({
                "thread_ids": [removed_a, removed_b, never_subscribed],
            })),
            Some(&Identity::User(user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["removed"], 2);
    assert_eq!(data["missing"].as_array().unwrap().len(), 1);
    assert_eq!(data["missing"][0], never_subscribed.to_string());
    assert!(data["failed"].as_array().unwrap().is_empty());

    // The untouched subscription survives.
    let response = app
        .request(
            "GET",
            "/api/subscriptions",
            None,
            Some(&Identity::User(user)),
        )
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["thread"], kept.to_string());
}

#[tokio::test]
async fn test_mark_seen_unknown_thread_not_found() {
    let app = TestApp::new();
    let user = app.register_user("user");

    let response = app
        .request(
            "POST",
            &format!("/api/subscriptions/{}/seen", Uuid::new_v4()),
            None,
            Some(&Identity::User(user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_thread_deletion_clears_subscriptions() {
    let app = TestApp::new();
    let user = app.register_user("user");
    let thread = Uuid::new_v4();

    app.subscribe(user, thread).await;

    let response = app
        .request("DELETE", &format!("/api/threads/{thread}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["affected"], 1);

    let response = app
        .request(
            "GET",
            "/api/subscriptions",
            None,
            Some(&Identity::User(user)),
        )
        .await;
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_is_paginated() {
    let app = TestApp::new();
    let user = app.register_user("user");

    for _ in 0..3 {
        app.subscribe(user, Uuid::new_v4()).await;
    }

    let response = app
        .request(
            "GET",
            "/api/subscriptions?page=1&page_size=2",
            None,
            Some(&Identity::User(user)),
        )
        .await;

    let data = &response.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
}

#[tokio::test]
async fn test_guest_cannot_subscribe() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            &format!("/api/subscriptions/{}", Uuid::new_v4()),
            None,
            Some(&Identity::Guest(Uuid::new_v4())),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

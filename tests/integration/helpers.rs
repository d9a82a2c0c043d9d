//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use agora_core::config::AppConfig;
use agora_database::Stores;
use agora_database::memory::activity::MemoryActivityStore;
use agora_database::memory::directory::MemoryDirectory;
use agora_database::memory::subscription::MemorySubscriptionStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Directory handle for registering display tags
    pub directory: Arc<MemoryDirectory>,
}

/// Identity presented to the API via headers.
pub enum Identity {
    /// Authenticated user browsing normally.
    User(Uuid),
    /// Authenticated user browsing anonymously.
    Anonymous(Uuid),
    /// Unauthenticated visitor with a browsing session.
    Guest(Uuid),
}

impl TestApp {
    /// Create a new test application backed by in-memory stores.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let directory = Arc::new(MemoryDirectory::new());

        let stores = Stores {
            activity: Arc::new(MemoryActivityStore::new()),
            subscriptions: Arc::new(MemorySubscriptionStore::new()),
            directory: Arc::clone(&directory) as Arc<dyn agora_core::traits::directory::IdentityDirectory>,
        };

        let state = agora_api::build_state(config, stores).expect("Failed to build app state");
        let router = agora_api::build_app(state);

        Self { router, directory }
    }

    /// Register a user with a display tag and return their id.
    pub fn register_user(&self, tag: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.directory.register(id.into(), tag);
        id
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        identity: Option<&Identity>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        match identity {
            Some(Identity::User(id)) => {
                req = req.header("x-agora-user", id.to_string());
            }
            Some(Identity::Anonymous(id)) => {
                req = req
                    .header("x-agora-user", id.to_string())
                    .header("x-agora-anonymous", "1");
            }
            Some(Identity::Guest(session)) => {
                req = req.header("x-agora-session", session.to_string());
            }
            None => {}
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Record a heartbeat for the identity at the section.
    pub async fn heartbeat(&self, identity: &Identity, section: &str) {
        let response = self
            .request(
                "POST",
                "/api/presence/heartbeat",
                Some(serde_json::json!({ "section": section })),
                Some(identity),
            )
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    /// Fetch the presence snapshot seen by the identity.
    pub async fn snapshot(&self, identity: &Identity, section: &str) -> Value {
        let response = self
            .request(
                "GET",
                &format!("/api/presence?section={section}"),
                None,
                Some(identity),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body.get("data").cloned().expect("No data field")
    }

    /// Subscribe the user to a thread.
    pub async fn subscribe(&self, user: Uuid, thread: Uuid) {
        let response = self
            .request(
                "POST",
                &format!("/api/subscriptions/{thread}"),
                None,
                Some(&Identity::User(user)),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    /// Whether the user has any unseen subscription.
    pub async fn has_unseen(&self, user: Uuid) -> bool {
        let response = self
            .request(
                "GET",
                "/api/subscriptions/unseen",
                None,
                Some(&Identity::User(user)),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["has_unseen"]
            .as_bool()
            .expect("No has_unseen field")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

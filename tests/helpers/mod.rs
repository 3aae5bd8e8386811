//! Shared test helpers for integration tests.
//!
//! Every test gets its own router over a fresh memory backend, so tests
//! never share rows.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use expensehub_api::{AppState, build_router};
use expensehub_core::config::{AppConfig, DatabaseBackend};
use expensehub_database::{MemoryDatabase, Stores};

pub const PASSWORD: &str = "correct horse";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Tables behind the router, for direct inspection
    pub db: MemoryDatabase,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Accounts are confirmed at sign-up.
    pub fn new() -> Self {
        Self::with_config(test_config(false))
    }

    /// Accounts must follow the confirmation link before signing in.
    pub fn with_email_confirmation() -> Self {
        Self::with_config(test_config(true))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let db = MemoryDatabase::new();
        let state = AppState::new(config.clone(), Stores::from_memory(db.clone()));
        Self {
            router: build_router(state),
            db,
            config,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body_str, cookie).await
    }

    /// Send a raw body, for malformed-JSON cases.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.dispatch(req).await
    }

    /// Request with an `Authorization: Bearer` header instead of a cookie.
    pub async fn request_with_bearer(&self, method: &str, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Register and sign in `email`; returns the `Cookie` header value.
    pub async fn signed_in(&self, email: &str) -> String {
        let response = self.sign_up(email, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "Sign-up failed: {:?}", response.body);

        let response = self.sign_in(email, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "Sign-in failed: {:?}", response.body);

        response
            .session_cookie(&self.config.session.cookie_name)
            .expect("No session cookie in sign-in response")
    }

    /// Create a group as the cookie's owner and return its id.
    pub async fn create_group(&self, cookie: &str, name: &str) -> String {
        let response = self
            .request("POST", "/api/groups", Some(json!({ "name": name })), Some(cookie))
            .await;
        assert_eq!(response.status, StatusCode::OK, "Create group failed: {:?}", response.body);
        response.body["id"].as_str().expect("group id").to_string()
    }

    /// Create an expense under `group_id` and return the response body.
    pub async fn create_expense(
        &self,
        cookie: &str,
        group_id: &str,
        description: &str,
        amount: Value,
    ) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/expenses/{group_id}"),
            Some(json!({ "description": description, "amount": amount })),
            Some(cookie),
        )
        .await
    }
}

fn test_config(require_email_confirmation: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.require_email_confirmation = require_email_confirmation;
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` for non-JSON)
    pub body: Value,
    /// Raw body
    pub text: String,
}

impl TestResponse {
    /// `name=value` of the `Set-Cookie` header for `name`, if any.
    pub fn session_cookie(&self, name: &str) -> Option<String> {
        self.set_cookie(name)
            .and_then(|header| header.split(';').next().map(str::to_string))
    }

    /// Full `Set-Cookie` header for `name`, if any.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }

    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `error` field of a JSON error body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

//! Test fixtures: an in-process server bound to an ephemeral port.
#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};
use kaiwa_server::{
    build_app,
    config::ServerConfig,
    domain::{AccessGate, GateScope, RestrictedWindow},
    infrastructure::clock::FixedClock,
};
use kaiwa_shared::time::parse_time_of_day;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// Server running inside the test's runtime
pub struct TestServer {
    base_url: String,
    log_path: PathBuf,
    handle: JoinHandle<()>,
}

/// Calendar date is irrelevant; only the time of day matters to the gate.
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid time")
}

/// 21:00–06:00 gate with the given scope
pub fn night_gate(scope: GateScope) -> AccessGate {
    AccessGate::new(
        RestrictedWindow::new(
            parse_time_of_day("21:00").unwrap(),
            parse_time_of_day("06:00").unwrap(),
        ),
        scope,
    )
}

impl TestServer {
    /// Server at noon with the default messaging gate
    pub fn start() -> Self {
        Self::start_with(at(12, 0), Some(night_gate(GateScope::messaging_default())))
    }

    pub fn start_with(now: NaiveDateTime, access_gate: Option<AccessGate>) -> Self {
        let log_path =
            std::env::temp_dir().join(format!("kaiwa-requests-{}.log", uuid::Uuid::new_v4()));
        Self::start_with_log(log_path, now, access_gate)
    }

    /// Server writing its request log to `log_path`
    pub fn start_with_log(
        log_path: PathBuf,
        now: NaiveDateTime,
        access_gate: Option<AccessGate>,
    ) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_log_path: log_path.clone(),
            access_gate,
        };
        let app = build_app(&config, Arc::new(FixedClock::new(now)));

        let std_listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        std_listener
            .set_nonblocking(true)
            .expect("Failed to set non-blocking");
        let addr = std_listener.local_addr().expect("Failed to read local addr");
        let listener =
            tokio::net::TcpListener::from_std(std_listener).expect("Failed to convert listener");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            log_path,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Lines written to the request log so far
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log_path)
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Register a user and return `(user_id, token)`
    pub async fn register(&self, client: &reqwest::Client, username: &str) -> (String, String) {
        let response = client
            .post(self.url("/api/users"))
            .json(&json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "first_name": username.to_uppercase(),
                "last_name": "Tester",
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.expect("Failed to parse JSON");
        (
            body["user"]["user_id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    /// Start a conversation as `token` with `others` and return its id
    pub async fn create_conversation(
        &self,
        client: &reqwest::Client,
        token: &str,
        others: &[&str],
    ) -> String {
        let response = client
            .post(self.url("/api/conversations"))
            .bearer_auth(token)
            .json(&json!({ "participant_ids": others }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["conversation_id"].as_str().unwrap().to_string()
    }

    /// Send a message as `token` and return its id
    pub async fn send_message(
        &self,
        client: &reqwest::Client,
        token: &str,
        conversation_id: &str,
        text: &str,
    ) -> String {
        let response = client
            .post(self.url("/api/messages"))
            .bearer_auth(token)
            .json(&json!({ "conversation_id": conversation_id, "message_body": text }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);

        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["message_id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
        let _ = std::fs::remove_file(&self.log_path);
    }
}

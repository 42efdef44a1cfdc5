//! HTTP API integration tests.
//!
//! Health check, registration, authentication and token refresh.

mod fixtures;
use fixtures::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(server.url("/api/health"))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_and_me() {
    // テスト項目: 登録で返されたトークンで /api/users/me が自分を返す
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (user_id, token) = server.register(&client, "alice").await;

    // when (操作):
    let response = client
        .get(server.url("/api/users/me"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["first_name"], "ALICE");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    // テスト項目: 同じユーザー名での二重登録は 409 になる
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    server.register(&client, "alice").await;

    // when (操作):
    let response = client
        .post(server.url("/api/users"))
        .json(&json!({ "username": "alice", "email": "other@example.com" }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_register_invalid_email() {
    // テスト項目: 不正なメールアドレスでの登録は 400 になる
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .post(server.url("/api/users"))
        .json(&json!({ "username": "alice", "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_protected_endpoint_requires_credentials() {
    // テスト項目: 認証情報なし・不正なトークンでは 401 になる
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();

    // when (操作):
    let anonymous = client
        .get(server.url("/api/conversations"))
        .send()
        .await
        .expect("Failed to send request");
    let invalid = client
        .get(server.url("/api/conversations"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(anonymous.status(), 401);
    let body: Value = anonymous.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["detail"],
        "Authentication credentials were not provided."
    );

    assert_eq!(invalid.status(), 401);
    let body: Value = invalid.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "Invalid token.");
}

#[tokio::test]
async fn test_token_refresh_rotates_token() {
    // テスト項目: トークン更新後、古いトークンは使えず新しいトークンが使える
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, old_token) = server.register(&client, "alice").await;

    // when (操作):
    let response = client
        .post(server.url("/api/token/refresh/"))
        .bearer_auth(&old_token)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let new_token = body["token"].as_str().unwrap().to_string();
    assert_ne!(new_token, old_token);

    let with_old = client
        .get(server.url("/api/users/me"))
        .bearer_auth(&old_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(with_old.status(), 401);

    let with_new = client
        .get(server.url("/api/users/me"))
        .bearer_auth(&new_token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(with_new.status(), 200);
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    // テスト項目: 存在しないパスは JSON の 404 を返す
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(server.url("/api/does-not-exist"))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "Not found.");
}

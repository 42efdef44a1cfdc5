//! Conversation endpoint integration tests.

mod fixtures;
use fixtures::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_and_list_conversations() {
    // テスト項目: 作成した会話が参加者双方の一覧に表示される
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (alice_id, alice) = server.register(&client, "alice").await;
    let (bob_id, bob) = server.register(&client, "bob").await;
    let (_, carol) = server.register(&client, "carol").await;

    // when (操作):
    let response = client
        .post(server.url("/api/conversations"))
        .bearer_auth(&alice)
        .json(&json!({ "participant_ids": [&bob_id] }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse JSON");
    let participants: Vec<&str> = created["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(participants, vec![alice_id.as_str(), bob_id.as_str()]);

    for (token, expected) in [(&alice, 1), (&bob, 1), (&carol, 0)] {
        let listed: Value = client
            .get(server.url("/api/conversations"))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        assert_eq!(listed.as_array().unwrap().len(), expected);
    }
}

#[tokio::test]
async fn test_create_conversation_with_unknown_participant() {
    // テスト項目: 存在しないユーザーを参加者に指定すると 400 になる
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, alice) = server.register(&client, "alice").await;

    // when (操作):
    let response = client
        .post(server.url("/api/conversations"))
        .bearer_auth(&alice)
        .json(&json!({ "participant_ids": [uuid::Uuid::new_v4().to_string()] }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_search_conversations_by_participant_email() {
    // テスト項目: search で参加者のメールアドレスに一致する会話だけを返す
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, alice) = server.register(&client, "alice").await;
    let (bob_id, _) = server.register(&client, "bob").await;
    let (carol_id, _) = server.register(&client, "carol").await;
    let with_bob = server.create_conversation(&client, &alice, &[&bob_id]).await;
    server.create_conversation(&client, &alice, &[&carol_id]).await;

    // when (操作):
    let listed: Value = client
        .get(server.url("/api/conversations?search=BOB@example"))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["conversation_id"], with_bob.as_str());
}

#[tokio::test]
async fn test_get_conversation_permissions() {
    // テスト項目: 参加者は会話を取得でき、非参加者は 403、存在しない会話は 404
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, alice) = server.register(&client, "alice").await;
    let (bob_id, bob) = server.register(&client, "bob").await;
    let (_, carol) = server.register(&client, "carol").await;
    let conversation_id = server.create_conversation(&client, &alice, &[&bob_id]).await;
    let path = format!("/api/conversations/{conversation_id}");

    // when (操作):
    let as_bob = client
        .get(server.url(&path))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to send request");
    let as_carol = client
        .get(server.url(&path))
        .bearer_auth(&carol)
        .send()
        .await
        .expect("Failed to send request");
    let missing = client
        .get(server.url(&format!(
            "/api/conversations/{}",
            uuid::Uuid::new_v4()
        )))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to send request");
    let malformed = client
        .get(server.url("/api/conversations/not-a-uuid"))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(as_bob.status(), 200);
    assert_eq!(as_carol.status(), 403);
    assert_eq!(missing.status(), 404);
    assert_eq!(malformed.status(), 404);
}

#[tokio::test]
async fn test_update_conversation_participants() {
    // テスト項目: PATCH で参加者を置き換えられ、空の参加者は 400 になる
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (alice_id, alice) = server.register(&client, "alice").await;
    let (bob_id, _) = server.register(&client, "bob").await;
    let (carol_id, carol) = server.register(&client, "carol").await;
    let conversation_id = server.create_conversation(&client, &alice, &[&bob_id]).await;
    let path = format!("/api/conversations/{conversation_id}");

    // when (操作):
    let updated = client
        .patch(server.url(&path))
        .bearer_auth(&alice)
        .json(&json!({ "participant_ids": [alice_id, carol_id] }))
        .send()
        .await
        .expect("Failed to send request");
    let emptied = client
        .put(server.url(&path))
        .bearer_auth(&alice)
        .json(&json!({ "participant_ids": [] }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(updated.status(), 200);
    assert_eq!(emptied.status(), 400);

    let as_carol = client
        .get(server.url(&path))
        .bearer_auth(&carol)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(as_carol.status(), 200);
}

#[tokio::test]
async fn test_delete_conversation_removes_messages() {
    // テスト項目: 会話を削除するとそのメッセージも消える
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, alice) = server.register(&client, "alice").await;
    let (bob_id, _) = server.register(&client, "bob").await;
    let conversation_id = server.create_conversation(&client, &alice, &[&bob_id]).await;
    let message_id = server
        .send_message(&client, &alice, &conversation_id, "hello")
        .await;

    // when (操作):
    let response = client
        .delete(server.url(&format!("/api/conversations/{conversation_id}")))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 204);
    let message = client
        .get(server.url(&format!("/api/messages/{message_id}")))
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(message.status(), 404);
}

#[tokio::test]
async fn test_list_conversation_messages() {
    // テスト項目: 会話のメッセージ一覧は参加者だけが取得でき、専用のエラー文言を返す
    // given (前提条件):
    let server = TestServer::start();
    let client = reqwest::Client::new();
    let (_, alice) = server.register(&client, "alice").await;
    let (bob_id, bob) = server.register(&client, "bob").await;
    let (_, carol) = server.register(&client, "carol").await;
    let conversation_id = server.create_conversation(&client, &alice, &[&bob_id]).await;
    server
        .send_message(&client, &alice, &conversation_id, "first")
        .await;
    server
        .send_message(&client, &bob, &conversation_id, "second")
        .await;
    let path = format!("/api/conversations/{conversation_id}/messages");

    // when (操作):
    let as_bob = client
        .get(server.url(&path))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to send request");
    let as_carol = client
        .get(server.url(&path))
        .bearer_auth(&carol)
        .send()
        .await
        .expect("Failed to send request");
    let missing = client
        .get(server.url(&format!(
            "/api/conversations/{}/messages",
            uuid::Uuid::new_v4()
        )))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(as_bob.status(), 200);
    let body: Value = as_bob.json().await.expect("Failed to parse JSON");
    let texts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message_body"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["first", "second"]);

    assert_eq!(as_carol.status(), 403);
    let body: Value = as_carol.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["detail"],
        "You do not have permission to access these messages."
    );

    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "Conversation not found");
}

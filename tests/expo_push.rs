//! Integration tests for the Expo push client

use expo_push_sender::{
    messaging::{client::MessagingClient, expo::ExpoPushClient},
    service::models::{DeliveryResult, NotificationRequest},
};
use mockito::{self, Matcher};
use serde_json::json;

const PUSH_PATH: &str = "/--/api/v2/push/send";

fn client_for(server: &mockito::Server) -> ExpoPushClient {
    ExpoPushClient::with_endpoint(&format!("{}{}", server.url(), PUSH_PATH))
}

#[tokio::test]
async fn test_posts_exact_envelope_once() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", PUSH_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(
            r#"{"to":"abc","title":"Hi","body":"there","sound":"default","priority":"high"}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"status":"ok","id":"xyz"}}"#)
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .send(&NotificationRequest::new("abc", "Hi", "there"))
        .await;

    assert_eq!(result, DeliveryResult::Response(json!({"data": {"status": "ok", "id": "xyz"}})));
    assert!(result.is_delivered());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fields_are_forwarded_without_validation() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", PUSH_PATH)
        .match_body(Matcher::Json(json!({
            "to": "not-a-token",
            "title": "",
            "body": "line one\nline \"two\"",
            "sound": "default",
            "priority": "high"
        })))
        .with_status(200)
        .with_body(r#"{"data":{"status":"error","message":"DeviceNotRegistered"}}"#)
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .send(&NotificationRequest::new("not-a-token", "", "line one\nline \"two\""))
        .await;

    assert_eq!(
        result.to_json(),
        json!({"data": {"status": "error", "message": "DeviceNotRegistered"}})
    );
    assert!(!result.is_delivered());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_body_is_returned_verbatim() {
    let mut server = mockito::Server::new_async().await;

    let body = json!({"errors": [{"code": "VALIDATION_ERROR", "message": "\"to\" must be a string"}]});
    let mock = server
        .mock("POST", PUSH_PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .send(&NotificationRequest::new("abc", "Hi", "there"))
        .await;

    assert_eq!(result, DeliveryResult::Response(body));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_body_becomes_error_envelope() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", PUSH_PATH)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .send(&NotificationRequest::new("abc", "Hi", "there"))
        .await;

    let rendered = result.to_json();
    let description = rendered["error"].as_str().expect("error envelope");
    assert!(!description.is_empty());
    assert_eq!(rendered.as_object().map(|o| o.len()), Some(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_becomes_error_envelope() {
    let client = ExpoPushClient::with_endpoint(&format!("http://127.0.0.1:1{}", PUSH_PATH));

    let result = client.send(&NotificationRequest::new("abc", "Hi", "there")).await;

    match result {
        DeliveryResult::Failure(description) => {
            assert!(description.starts_with("error sending request"), "{}", description);
            assert!(description.to_lowercase().contains("refused"), "{}", description);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

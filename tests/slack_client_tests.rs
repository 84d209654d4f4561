use donutbot::errors::SlackError;
use donutbot::slack::attachments;
use donutbot::slack::{MessagingApi, SlackClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SlackClient {
    SlackClient::with_api_base_url("xoxb-test".to_string(), &server.uri())
}

#[tokio::test]
async fn test_post_message_sends_attachments() {
    let server = MockServer::start().await;
    let task = attachments::task_assignment("U1", "U2", "do X.", "DORIGIN");

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(header("Authorization", "Bearer xoxb-test"))
        .and(body_partial_json(json!({
            "channel": "U1",
            "attachments": [{
                "title": "New Task!",
                "callback_id": "DORIGIN",
                "color": "#3c0783",
                "fields": [
                    { "title": "Task", "value": "do X.", "short": false },
                    { "title": "Assigned by", "value": "<@U2>", "short": true }
                ],
                "actions": [{ "name": "option", "value": "completed", "type": "button" }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true, "channel": "D1", "ts": "1.2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).post_message("U1", &[task]).await.unwrap();
}

#[tokio::test]
async fn test_update_message_targets_channel_and_ts() {
    let server = MockServer::start().await;
    let completed = attachments::completed_task(&attachments::task_assignment(
        "U1", "U2", "do X.", "DORIGIN",
    ));

    Mock::given(method("POST"))
        .and(path("/chat.update"))
        .and(body_partial_json(json!({
            "channel": "DTASK",
            "ts": "1.2",
            "attachments": [{ "callback_id": "disabled", "title": "Completed Task." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_message("DTASK", "1.2", &[completed])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_slack_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false, "error": "channel_not_found"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .post_message("CNOPE", &[attachments::intro()])
        .await
        .unwrap_err();

    match err {
        SlackError::ApiError(msg) => assert!(msg.contains("channel_not_found")),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.update"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server)
        .update_message("D1", "1.2", &[attachments::intro()])
        .await
        .unwrap_err();

    assert!(matches!(err, SlackError::ApiError(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_unreachable_host_is_an_http_error() {
    let client = SlackClient::with_api_base_url("xoxb-test".to_string(), "http://127.0.0.1:1");

    let err = client
        .post_message("D1", &[attachments::intro()])
        .await
        .unwrap_err();

    assert!(matches!(err, SlackError::HttpError(_)));
}

#[tokio::test]
async fn test_open_dm_uses_configured_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/conversations.open"))
        .and(header("Authorization", "Bearer xoxb-test"))
        .and(body_partial_json(json!({ "users": "U42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true, "channel": { "id": "D042" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channel = client(&server).open_dm("U42").await.unwrap();

    assert_eq!(channel, "D042");
}

#[tokio::test]
async fn test_open_dm_without_channel_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/conversations.open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = client(&server).open_dm("U42").await.unwrap_err();

    assert!(matches!(err, SlackError::ApiError(ref msg) if msg.contains("conversations.open")));
}

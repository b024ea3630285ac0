use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use taskmate_llm::{ChatClient, ChatOptions, ChatRequest, LlmError, Message, OpenAIClient};

fn client_for(server: &mockito::Server) -> OpenAIClient {
    OpenAIClient::with_endpoint(
        "test-key",
        format!("{}/v1/chat/completions", server.url()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_chat_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "You are helpful"},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hi there"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let request = ChatRequest::new(
        "test-model",
        vec![Message::system("You are helpful"), Message::human("Hello")],
    );
    let response = client.chat(request).await.unwrap();

    assert_eq!(response.content, "Hi there");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 15);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_sends_options_when_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"temperature": 0.5, "max_tokens": 64})))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = ChatRequest::new("test-model", vec![Message::human("Hi")])
        .with_options(ChatOptions::new().temperature(0.5).max_tokens(64));
    let response = client.chat(request).await.unwrap();

    assert_eq!(response.content, "ok");
    assert!(response.usage.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("upstream overloaded")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("test-model", vec![Message::human("Hi")]))
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_other_2xx_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(202)
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "queued"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("test-model", vec![Message::human("Hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Api { status: 202, .. }));
}

#[tokio::test]
async fn test_missing_choices_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("test-model", vec![Message::human("Hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .chat(ChatRequest::new("test-model", vec![Message::human("Hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

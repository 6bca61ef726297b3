//! HTTP contract tests for `SpeechClient` against a mockito server.

use mockito::{Matcher, Server};
use serde_json::json;
use voice_lib_rust::{Error, SpeechClient, SpeechConfig};

const MPEG_BYTES: &[u8] = b"\xff\xfb\x90\x44fake-mpeg-frame-data";

fn client_for(base_url: &str, voice_id: &str, api_key: &str) -> SpeechClient {
    let mut config = SpeechConfig::new(voice_id, api_key);
    config.base_url = base_url.to_string();
    SpeechClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_synthesize_success_returns_audio() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(MPEG_BYTES)
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    let audio = client.synthesize("Hello world").await.unwrap();

    assert!(!audio.is_empty());
    assert_eq!(&audio.data[..], MPEG_BYTES);
    assert_eq!(audio.format.mime_type(), "audio/mpeg");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_synthesize_error_status_is_api_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    let err = client.synthesize("Hello").await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn test_quota_exhaustion_is_classified() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .with_status(429)
        .with_body(r#"{"detail":"quota exceeded"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    let err = client.synthesize("Hello").await.unwrap_err();

    assert!(err.is_quota());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_request_carries_fixed_voice_settings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .match_body(Matcher::Json(json!({
            "text": "any text at all",
            "model_id": "eleven_monolingual_v1",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "speed": 1.0,
            },
        })))
        .with_status(200)
        .with_body(MPEG_BYTES)
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    client.synthesize("any text at all").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .match_header("xi-api-key", "key-a")
        .match_header("accept", "audio/mpeg")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(MPEG_BYTES)
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    client.synthesize("Hello").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_credential_follows_configuration() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .match_header("xi-api-key", "key-a")
        .with_status(200)
        .with_body(MPEG_BYTES)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .match_header("xi-api-key", "key-b")
        .with_status(200)
        .with_body(MPEG_BYTES)
        .create_async()
        .await;

    client_for(&server.url(), "voice-a", "key-a")
        .synthesize("one")
        .await
        .unwrap();
    client_for(&server.url(), "voice-a", "key-b")
        .synthesize("two")
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/voice-a")
        .with_status(200)
        .with_body(MPEG_BYTES)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server.url(), "voice-a", "key-a");
    let (one, two) = tokio::join!(client.synthesize("first"), client.synthesize("second"));

    assert!(one.is_ok());
    assert!(two.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Take a URL from a server that is gone by the time we call it.
    let url = {
        let server = Server::new_async().await;
        server.url()
    };

    let client = client_for(&url, "voice-a", "key-a");
    let err = client.synthesize("Hello").await.unwrap_err();

    assert!(matches!(err, Error::Network { .. }));
    assert!(err.is_retryable());
}

//! End-to-end exercises for both proxy endpoints against a local mock
//! server: happy paths, the error-kind contract, and the exact payload
//! each operation puts on the wire.

use dlai_proxy::*;
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> ProxyClient {
    ProxyClient::with_base_url(server.url())
}

/* ───────────────────────── chat completions ───────────────────────── */

#[test]
fn chat_completion_sends_the_default_payload_and_parses_the_reply() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": DEFAULT_CHAT_MODEL,
            "messages": [{"role": "user", "content": "Say hi"}],
            "top_p": "none",
            "temperature": "none",
            "max_tokens": 500,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}],"usage":{"total_tokens":7}}"#,
        )
        .create();

    let reply = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("Say hi").build())
        .unwrap();

    mock.assert();
    assert_eq!(
        reply,
        ChatCompletion {
            role: "assistant".into(),
            content: "hi".into(),
            total_tokens: 7,
        }
    );
}

#[test]
fn chat_completion_returns_the_last_choice() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(
            r#"{
                "choices": [
                    {"message": {"role": "assistant", "content": "draft"}},
                    {"message": {"role": "assistant", "content": "final"}}
                ],
                "usage": {"total_tokens": 11}
            }"#,
        )
        .create();

    let reply = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("pick one").build())
        .unwrap();

    assert_eq!(reply.content, "final");
    assert_eq!(reply.total_tokens, 11);
}

#[test]
fn chat_completion_forwards_extra_options_verbatim() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "repetition_penalty": 1.1,
            "stop": ["\n"],
        })))
        .with_status(200)
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}],"usage":{"total_tokens":3}}"#,
        )
        .create();

    let mut extra = serde_json::Map::new();
    extra.insert("repetition_penalty".into(), json!(1.1));
    extra.insert("stop".into(), json!(["\n"]));

    client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("hi").extra(extra).build())
        .unwrap();

    mock.assert();
}

#[test]
fn chat_completion_surfaces_the_raw_error_body() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("boom")
        .create();

    let err = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("hi").build())
        .expect_err("expected a remote error");

    match err {
        DlaiProxyError::Remote { code, body } => {
            assert_eq!(code, 500);
            assert!(body.contains("boom"), "raw body lost: {body:?}");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[test]
fn chat_completion_rejects_a_non_json_body() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>definitely not json</html>")
        .create();

    let err = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("hi").build())
        .expect_err("expected a parse error");

    assert!(matches!(err, DlaiProxyError::Parse(_)), "got {err:?}");
}

#[test]
fn chat_completion_requires_the_usage_field() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#)
        .create();

    let err = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("hi").build())
        .expect_err("expected a shape error");

    assert!(matches!(err, DlaiProxyError::Shape { .. }), "got {err:?}");
}

#[test]
fn chat_completion_with_empty_choices_is_a_shape_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[],"usage":{"total_tokens":0}}"#)
        .create();

    let err = client_for(&server)
        .chat_completion(&ChatRequest::builder().prompt("hi").build())
        .expect_err("expected a shape error");

    assert!(matches!(err, DlaiProxyError::Shape { .. }), "got {err:?}");
}

/* ─────────────────────────── embeddings ───────────────────────────── */

#[test]
fn embedding_sends_the_payload_and_returns_the_first_vector() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/embeddings")
        .match_body(Matcher::Json(json!({
            "model": DEFAULT_EMBEDDING_MODEL,
            "input": "hello",
        })))
        .with_status(200)
        .with_body(r#"{"data":[{"embedding":[0.1,0.2,0.3]},{"embedding":[9.0]}]}"#)
        .create();

    let vector = client_for(&server)
        .embedding(&EmbeddingsRequest::builder().input("hello").build())
        .unwrap();

    mock.assert();
    assert_eq!(vector, vec![0.1_f32, 0.2, 0.3]);
}

#[test]
fn embedding_with_empty_data_is_a_shape_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create();

    let err = client_for(&server)
        .embedding(&EmbeddingsRequest::builder().input("hello").build())
        .expect_err("expected a shape error");

    assert!(matches!(err, DlaiProxyError::Shape { .. }), "got {err:?}");
}

#[test]
fn embedding_surfaces_the_raw_error_body() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/embeddings")
        .with_status(503)
        .with_body("proxy overloaded")
        .create();

    let err = client_for(&server)
        .embedding(&EmbeddingsRequest::builder().input("hello").build())
        .expect_err("expected a remote error");

    match err {
        DlaiProxyError::Remote { code, body } => {
            assert_eq!(code, 503);
            assert!(body.contains("proxy overloaded"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

/* ───────────────────────────── client ─────────────────────────────── */

#[test]
fn api_key_is_stored_but_never_sent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/embeddings")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"data":[{"embedding":[0.5]}]}"#)
        .create();

    let client = client_for(&server).with_api_key("unused-key");
    assert_eq!(client.api_key(), Some("unused-key"));

    client
        .embedding(&EmbeddingsRequest::builder().input("hello").build())
        .unwrap();

    mock.assert();
}

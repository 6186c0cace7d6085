//! End-to-end tests for the HTTP API.
//!
//! Each test binds the router to an ephemeral port and talks to it with `reqwest`,
//! covering JSON, urlencoded form and multipart request bodies.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use word_frequency::cache::fingerprint::fingerprint;
use word_frequency::cache::memory::MemoryCache;
use word_frequency::cache::ranking::RankingCache;
use word_frequency::cache::store::DEFAULT_TTL;
use word_frequency::frequency::protocol::{ENDPOINT_HEALTH, ENDPOINT_WORD_FREQUENCY};
use word_frequency::frequency::request::RequestLimits;
use word_frequency::server::{router, spawn_sweeper};

struct TestApp {
    base_url: String,
    memory: Arc<MemoryCache>,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn(max_text_bytes: usize, ttl: Duration) -> Self {
        let memory = Arc::new(MemoryCache::new());
        let cache = Arc::new(RankingCache::new(memory.clone(), ttl));
        let app = router(cache, RequestLimits::new(max_text_bytes));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            memory,
            client: reqwest::Client::new(),
        }
    }

    async fn start() -> Self {
        Self::spawn(1024 * 1024, DEFAULT_TTL).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(ENDPOINT_WORD_FREQUENCY))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post_urlencoded(&self, pairs: &[(&str, &str)]) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(ENDPOINT_WORD_FREQUENCY))
            .form(pairs)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post_form(&self, form: Form) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(ENDPOINT_WORD_FREQUENCY))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

fn file_part(content: &str) -> Part {
    Part::bytes(content.as_bytes().to_vec())
        .file_name("input.txt")
        .mime_str("text/plain")
        .unwrap()
}

// ============================================================
// HAPPY PATH
// ============================================================

#[tokio::test]
async fn test_json_request_returns_ranked_words() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_json(json!({"text": "the the the cat", "top": 5, "exclude": ["the"]}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [{"word": "cat", "count": 1}]}));
}

#[tokio::test]
async fn test_punctuation_and_digits_dropped() {
    let app = TestApp::start().await;

    let (status, body) = app.post_json(json!({"text": "123 !!! hello", "top": 3})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [{"word": "hello", "count": 1}]}));
}

#[tokio::test]
async fn test_case_insensitive_counting() {
    let app = TestApp::start().await;

    let (_, body) = app.post_json(json!({"text": "Cat cat CAT", "top": 1})).await;

    assert_eq!(body, json!({"data": [{"word": "cat", "count": 3}]}));
}

#[tokio::test]
async fn test_top_larger_than_distinct_words() {
    let app = TestApp::start().await;

    let (status, body) = app.post_json(json!({"text": "a b", "top": 10})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_file_upload_matches_inline_text() {
    let app = TestApp::start().await;
    let content = "Rust is fast. Rust is safe! Fast, fast code.";

    let (_, inline) = app.post_json(json!({"text": content, "top": 3})).await;

    let form = Form::new().text("top", "3").part("file", file_part(content));
    let (status, uploaded) = app.post_form(form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(inline, uploaded);
    assert_eq!(
        uploaded,
        json!({"data": [
            {"word": "fast", "count": 3},
            {"word": "rust", "count": 2},
            {"word": "is", "count": 2},
        ]})
    );
}

#[tokio::test]
async fn test_file_wins_over_inline_text() {
    let app = TestApp::start().await;

    let form = Form::new()
        .text("text", "ignored ignored")
        .text("top", "5")
        .part("file", file_part("kept"));
    let (_, body) = app.post_form(form).await;

    assert_eq!(body, json!({"data": [{"word": "kept", "count": 1}]}));
}

#[tokio::test]
async fn test_multipart_repeated_exclude_fields() {
    let app = TestApp::start().await;

    let form = Form::new()
        .text("text", "a a a b b c")
        .text("top", "5")
        .text("exclude[]", "a")
        .text("exclude[]", "b");
    let (status, body) = app.post_form(form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [{"word": "c", "count": 1}]}));
}

#[tokio::test]
async fn test_urlencoded_form_request() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_urlencoded(&[("text", "cat cat dog"), ("top", "2")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"data": [{"word": "cat", "count": 2}, {"word": "dog", "count": 1}]})
    );
}

#[tokio::test]
async fn test_urlencoded_repeated_exclude_fields() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_urlencoded(&[
            ("text", "a a a b b c"),
            ("top", "5"),
            ("exclude[]", "a"),
            ("exclude[]", "b"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [{"word": "c", "count": 1}]}));
}

#[tokio::test]
async fn test_urlencoded_and_json_share_cache_entry() {
    let app = TestApp::start().await;

    let (_, from_json) = app
        .post_json(json!({"text": "one two two", "top": 2, "exclude": ["x"]}))
        .await;
    let (_, from_form) = app
        .post_urlencoded(&[("text", "one two two"), ("top", "2"), ("exclude[]", "x")])
        .await;

    assert_eq!(from_json, from_form);
    assert_eq!(app.memory.len(), 1);
}

#[tokio::test]
async fn test_urlencoded_validation_errors() {
    let app = TestApp::start().await;

    let (status, body) = app.post_urlencoded(&[("text", "hi"), ("top", "zero")]).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["top"][0], "The top field must be an integer.");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::start().await;

    let body: Value = app
        .client
        .get(app.url(ENDPOINT_HEALTH))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok"}));
}

// ============================================================
// CACHING
// ============================================================

#[tokio::test]
async fn test_identical_request_served_from_cache() {
    let app = TestApp::start().await;
    let request = json!({"text": "one two two", "top": 2, "exclude": ["x"]});

    let (_, first) = app.post_json(request.clone()).await;
    assert_eq!(app.memory.len(), 1);

    let (_, second) = app.post_json(request).await;
    assert_eq!(first, second);
    assert_eq!(app.memory.len(), 1);
}

#[tokio::test]
async fn test_cache_hit_skips_recomputation() {
    let app = TestApp::start().await;
    let request = json!({"text": "one two two", "top": 2});
    app.post_json(request.clone()).await;

    // Replace the stored ranking; a hit must serve it verbatim
    let key = fingerprint("one two two", 2, &[]);
    app.memory
        .store_local(&key, r#"[{"word":"planted","count":7}]"#.to_string(), DEFAULT_TTL)
        .unwrap();

    let (_, body) = app.post_json(request).await;
    assert_eq!(body, json!({"data": [{"word": "planted", "count": 7}]}));
}

#[tokio::test]
async fn test_upload_and_inline_share_cache_entry() {
    let app = TestApp::start().await;

    app.post_json(json!({"text": "same words", "top": 2})).await;
    let form = Form::new().text("top", "2").part("file", file_part("same words"));
    app.post_form(form).await;

    assert_eq!(app.memory.len(), 1);
}

#[tokio::test]
async fn test_cache_entry_expires() {
    let app = TestApp::spawn(1024, Duration::from_millis(50)).await;
    let handle = spawn_sweeper(app.memory.clone(), Duration::from_millis(10));

    app.post_json(json!({"text": "short lived", "top": 1})).await;
    assert_eq!(app.memory.len(), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(app.memory.is_empty());

    handle.abort();
}

// ============================================================
// ERRORS
// ============================================================

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = TestApp::start().await;

    let (status, body) = app.post_json(json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["text"][0], "The text field is required.");
    assert_eq!(body["errors"]["top"][0], "The top field is required.");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_non_positive_top_rejected() {
    let app = TestApp::start().await;

    let (status, body) = app.post_json(json!({"text": "hi", "top": 0})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["top"][0], "The top field must be at least 1.");
}

#[tokio::test]
async fn test_non_string_exclude_entry_rejected() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_json(json!({"text": "hi", "top": 1, "exclude": ["ok", 5]}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["exclude.1"][0],
        "The exclude.1 field must be a string."
    );
}

#[tokio::test]
async fn test_oversized_text_rejected() {
    let app = TestApp::spawn(16, DEFAULT_TTL).await;

    let (status, body) = app
        .post_json(json!({"text": "far too many words for the limit", "top": 1}))
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body.get("errors").is_none());
    assert!(app.memory.is_empty());
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let app = TestApp::spawn(16, DEFAULT_TTL).await;

    let form = Form::new()
        .text("top", "1")
        .part("file", file_part("this upload is longer than sixteen bytes"));
    let (status, _) = app.post_form(form).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = TestApp::start().await;

    let response = app
        .client
        .post(app.url(ENDPOINT_WORD_FREQUENCY))
        .header("content-type", "application/json")
        .body("{\"text\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_content_type_rejected() {
    let app = TestApp::start().await;

    let response = app
        .client
        .post(app.url(ENDPOINT_WORD_FREQUENCY))
        .header("content-type", "text/plain")
        .body("cat cat dog")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("unsupported content type"));
}

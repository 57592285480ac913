use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, AddResult, DeleteResult, ErrorPayload, Whitelist, LIST_LIMIT};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn list(email: &str) -> Request<String> {
    json_request(
        "/api/1.0/whitelists/list.json",
        serde_json::json!({"key": KEY, "email": email}),
    )
}

fn add(email: &str, comment: &str) -> Request<String> {
    json_request(
        "/api/1.0/whitelists/add.json",
        serde_json::json!({"key": KEY, "email": email, "comment": comment}),
    )
}

fn delete(email: &str) -> Request<String> {
    json_request(
        "/api/1.0/whitelists/delete.json",
        serde_json::json!({"key": KEY, "email": email}),
    )
}

// --- auth ---

#[tokio::test]
async fn wrong_key_returns_invalid_key() {
    let resp = app(KEY)
        .oneshot(json_request(
            "/api/1.0/whitelists/list.json",
            serde_json::json!({"key": "nope", "email": "a"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorPayload = body_json(resp).await;
    assert_eq!(err.status, "error");
    assert_eq!(err.name, "Invalid_Key");
    assert_eq!(err.code, -1);
}

#[tokio::test]
async fn missing_key_returns_invalid_key() {
    let resp = app(KEY)
        .oneshot(json_request(
            "/api/1.0/whitelists/delete.json",
            serde_json::json!({"email": "a@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorPayload = body_json(resp).await;
    assert_eq!(err.name, "Invalid_Key");
}

// --- list ---

#[tokio::test]
async fn list_empty() {
    let resp = app(KEY).oneshot(list("a")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Vec<Whitelist> = body_json(resp).await;
    assert!(entries.is_empty());
}

// --- add ---

#[tokio::test]
async fn add_returns_added_true() {
    let resp = app(KEY).oneshot(add("a@example.com", "vip")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: AddResult = body_json(resp).await;
    assert_eq!(result.email, "a@example.com");
    assert!(result.added);
}

#[tokio::test]
async fn add_blank_comment_is_validation_error() {
    let resp = app(KEY).oneshot(add("a@example.com", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorPayload = body_json(resp).await;
    assert_eq!(err.name, "ValidationError");
    assert!(err.message.contains("comment"));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let resp = app(KEY)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/1.0/whitelists/add.json")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body("{not json".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- delete ---

#[tokio::test]
async fn delete_unknown_returns_deleted_false() {
    let resp = app(KEY).oneshot(delete("ghost@example.com")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: DeleteResult = body_json(resp).await;
    assert!(!result.deleted);
}

// --- full lifecycle ---

#[tokio::test]
async fn whitelist_lifecycle() {
    use tower::Service;

    let mut app = app(KEY).into_service();

    // add two entries
    for (email, comment) in [("a@example.com", "first"), ("b@example.org", "second")] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(add(email, comment))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let result: AddResult = body_json(resp).await;
        assert!(result.added);
    }

    // adding again reports added=false
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(add("a@example.com", "again"))
        .await
        .unwrap();
    let result: AddResult = body_json(resp).await;
    assert!(!result.added);

    // list by prefix
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list("a@"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Vec<Whitelist> = body_json(resp).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].email, "a@example.com");
    assert_eq!(entries[0].detail, "first"); // unchanged by the duplicate add
    assert_eq!(entries[0].created_at.len(), "2013-01-01 15:30:27".len());

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete("a@example.com"))
        .await
        .unwrap();
    let result: DeleteResult = body_json(resp).await;
    assert!(result.deleted);

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list("a@"))
        .await
        .unwrap();
    let entries: Vec<Whitelist> = body_json(resp).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn list_is_capped() {
    use tower::Service;

    let mut app = app(KEY).into_service();
    for i in 0..LIST_LIMIT + 5 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(add(&format!("user{i:04}@example.com"), "bulk"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list("user"))
        .await
        .unwrap();
    let entries: Vec<Whitelist> = body_json(resp).await;
    assert_eq!(entries.len(), LIST_LIMIT);
}

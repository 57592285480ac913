//! In-memory stand-in for Mandrill's whitelist endpoints.
//!
//! Mirrors the vendor's wire behavior closely enough for client tests:
//! every route is a POST under `/api/1.0`, the API key travels in the JSON
//! body, and failures come back as a 500 with Mandrill's error payload.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Vendor-side cap on list results.
pub const LIST_LIMIT: usize = 1000;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Whitelist {
    pub email: String,
    pub detail: String,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WhitelistRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddResult {
    pub email: String,
    pub added: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub email: String,
    pub deleted: bool,
}

/// Mandrill's error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: String,
    pub code: i64,
    pub name: String,
    pub message: String,
}

pub struct MockError(ErrorPayload);

impl MockError {
    fn invalid_key() -> Self {
        Self(ErrorPayload {
            status: "error".to_string(),
            code: -1,
            name: "Invalid_Key".to_string(),
            message: "Invalid API key".to_string(),
        })
    }

    fn validation(message: String) -> Self {
        Self(ErrorPayload {
            status: "error".to_string(),
            code: -2,
            name: "ValidationError".to_string(),
            message,
        })
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.0)).into_response()
    }
}

pub type Db = Arc<RwLock<BTreeMap<String, Whitelist>>>;

#[derive(Clone)]
pub struct AppState {
    key: Arc<str>,
    db: Db,
}

impl AppState {
    fn authorize(&self, request: &WhitelistRequest) -> Result<(), MockError> {
        match request.key.as_deref() {
            Some(key) if key == &*self.key => Ok(()),
            _ => Err(MockError::invalid_key()),
        }
    }
}

pub fn app(key: &str) -> Router {
    let state = AppState {
        key: Arc::from(key),
        db: Arc::new(RwLock::new(BTreeMap::new())),
    };
    Router::new()
        .route("/api/1.0/whitelists/list.json", post(list_whitelists))
        .route("/api/1.0/whitelists/add.json", post(add_whitelist))
        .route("/api/1.0/whitelists/delete.json", post(delete_whitelist))
        .with_state(state)
}

pub async fn run(listener: TcpListener, key: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock mandrill listening");
    }
    axum::serve(listener, app(key)).await
}

fn required(value: Option<String>, field: &str) -> Result<String, MockError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MockError::validation(format!(
            "Validation error: {{\"{field}\":\"Sorry, this field can't be left blank.\"}}"
        ))),
    }
}

async fn list_whitelists(
    State(state): State<AppState>,
    Json(input): Json<WhitelistRequest>,
) -> Result<Json<Vec<Whitelist>>, MockError> {
    state.authorize(&input)?;
    let prefix = input.email.unwrap_or_default();
    let entries = state.db.read().await;
    let matched: Vec<Whitelist> = entries
        .values()
        .filter(|w| w.email.starts_with(&prefix))
        .take(LIST_LIMIT)
        .cloned()
        .collect();
    debug!(prefix = %prefix, count = matched.len(), "whitelists/list");
    Ok(Json(matched))
}

async fn add_whitelist(
    State(state): State<AppState>,
    Json(input): Json<WhitelistRequest>,
) -> Result<Json<AddResult>, MockError> {
    state.authorize(&input)?;
    let email = required(input.email, "email")?;
    let comment = required(input.comment, "comment")?;
    let mut entries = state.db.write().await;
    let added = !entries.contains_key(&email);
    if added {
        let entry = Whitelist {
            email: email.clone(),
            detail: comment,
            created_at: chrono::Utc::now().format(TIME_FORMAT).to_string(),
        };
        entries.insert(email.clone(), entry);
    }
    debug!(email = %email, added, "whitelists/add");
    Ok(Json(AddResult { email, added }))
}

async fn delete_whitelist(
    State(state): State<AppState>,
    Json(input): Json<WhitelistRequest>,
) -> Result<Json<DeleteResult>, MockError> {
    state.authorize(&input)?;
    let email = required(input.email, "email")?;
    let deleted = state.db.write().await.remove(&email).is_some();
    debug!(email = %email, deleted, "whitelists/delete");
    Ok(Json(DeleteResult { email, deleted }))
}

//! Mock `/data` API server
//!
//! In-memory implementation of the ofrenda `/data` endpoints, for local
//! development of the browser app and for integration tests. Entries live only
//! as long as the server. Availability can be switched off to simulate an
//! unreachable backend (every route then answers `503` with no body).

use crate::model::{Entry, EntryId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Mock REST API server configuration
#[derive(Debug, Clone)]
pub struct MockRestApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for MockRestApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Error answers of the mock API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockApiError {
    /// `503` without a body
    Unavailable,
    /// `400 {"error": ...}`
    BadRequest(String),
    /// `404 {"error": ...}`
    NotFound(String),
}

impl IntoResponse for MockApiError {
    fn into_response(self) -> Response {
        match self {
            MockApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            MockApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            MockApiError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response()
            }
        }
    }
}

/// Entry storage with sequential numeric ids
#[derive(Debug, Default)]
pub struct MockData {
    entries: Vec<Entry>,
    next_id: u64,
}

impl MockData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `entries`; entries without an id get one
    pub fn seeded(entries: Vec<Entry>) -> Self {
        let mut data = Self::new();
        data.next_id = entries
            .iter()
            .filter_map(|e| e.id.as_ref()?.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        for entry in entries {
            if entry.id.is_some() {
                data.entries.push(entry);
            } else {
                data.insert(entry);
            }
        }
        data
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn create(&mut self, entry: Entry) -> Result<Entry, MockApiError> {
        validate(&entry)?;
        Ok(self.insert(entry))
    }

    pub fn update(&mut self, id: &str, mut entry: Entry) -> Result<Entry, MockApiError> {
        validate(&entry)?;
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id.as_ref().map(EntryId::as_str) == Some(id))
            .ok_or_else(|| not_found(id))?;
        entry.id = Some(EntryId::new(id));
        *slot = entry.clone();
        Ok(entry)
    }

    pub fn remove(&mut self, id: &str) -> Result<Entry, MockApiError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id.as_ref().map(EntryId::as_str) == Some(id))
            .ok_or_else(|| not_found(id))?;
        Ok(self.entries.remove(index))
    }

    fn insert(&mut self, mut entry: Entry) -> Entry {
        self.next_id += 1;
        entry.id = Some(EntryId::from(self.next_id));
        self.entries.push(entry.clone());
        entry
    }
}

fn validate(entry: &Entry) -> Result<(), MockApiError> {
    if entry.name.trim().is_empty() {
        return Err(MockApiError::BadRequest("name is required".to_string()));
    }
    Ok(())
}

fn not_found(id: &str) -> MockApiError {
    MockApiError::NotFound(format!("entry {} not found", id))
}

/// Mock application state
#[derive(Clone)]
pub struct MockAppState {
    pub data: Arc<RwLock<MockData>>,
    available: Arc<AtomicBool>,
}

impl MockAppState {
    pub fn new(data: MockData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Switch the simulated backend on or off
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), MockApiError> {
        if self.is_available() {
            Ok(())
        } else {
            warn!("Mock API: unavailable, answering 503");
            Err(MockApiError::Unavailable)
        }
    }
}

/// Mock REST API server
pub struct MockRestApiServer {
    config: MockRestApiConfig,
    app_state: MockAppState,
}

impl MockRestApiServer {
    /// Create a new mock REST API server with empty storage
    pub fn new(config: MockRestApiConfig) -> Self {
        Self::with_data(config, MockData::new())
    }

    pub fn with_data(config: MockRestApiConfig, data: MockData) -> Self {
        Self {
            config,
            app_state: MockAppState::new(data),
        }
    }

    /// Shared handle to the server's state
    pub fn state(&self) -> MockAppState {
        self.app_state.clone()
    }

    /// Bind to the configured address and serve until the process ends
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let app = self.create_router();
        info!("Starting Mock REST API server on {}", listener.local_addr()?);
        info!(
            "Serving {} mock entries",
            self.app_state.data.read().await.entries().len()
        );
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Bind `127.0.0.1:0` and serve in a background task; returns the bound address
    pub async fn spawn_local(self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = self.serve(listener).await {
                warn!("Mock API server stopped: {}", e);
            }
        });
        Ok(addr)
    }

    /// Create the router with all endpoints
    fn create_router(&self) -> Router {
        Router::new()
            .route("/data", get(list_entries).post(create_entry))
            .route("/data/:id", put(update_entry).delete(delete_entry))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
            )
            .with_state(self.app_state.clone())
    }
}

async fn list_entries(
    State(state): State<MockAppState>,
) -> Result<Json<Vec<Entry>>, MockApiError> {
    state.check_available()?;
    let data = state.data.read().await;
    info!("Mock API: Listing {} entries", data.entries().len());
    Ok(Json(data.entries().to_vec()))
}

async fn create_entry(
    State(state): State<MockAppState>,
    Json(entry): Json<Entry>,
) -> Result<(StatusCode, Json<Entry>), MockApiError> {
    state.check_available()?;
    let created = state.data.write().await.create(entry)?;
    info!("Mock API: Created entry {:?}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entry(
    State(state): State<MockAppState>,
    Path(id): Path<String>,
    Json(entry): Json<Entry>,
) -> Result<Json<Entry>, MockApiError> {
    state.check_available()?;
    let updated = state.data.write().await.update(&id, entry)?;
    info!("Mock API: Updated entry {}", id);
    Ok(Json(updated))
}

async fn delete_entry(
    State(state): State<MockAppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, MockApiError> {
    state.check_available()?;
    state.data.write().await.remove(&id)?;
    info!("Mock API: Deleted entry {}", id);
    Ok(Json(json!({ "deleted": id })))
}

//! HTTP + WebSocket API
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /config - Active weights and engine config
//! - POST /session/new - Create session (one engine per session)
//! - GET /session/:id - Session smoothing state
//! - POST /session/:id/compute - Score one message
//! - POST /session/:id/reset - Reset smoothing state
//! - WS /ws/:id - Live results

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::core::{Dictionary, FasEngine, HourSource};
use crate::types::{EngineState, FasResult, Settings};

/// One conversation
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub engine: FasEngine,
    pub update_tx: broadcast::Sender<FasResult>,
}

/// Shared server state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    /// Loaded once at startup, read-only afterwards
    pub dictionary: Option<Arc<Dictionary>>,
    pub settings: Settings,
    pub hour_source: HourSource,
}

impl AppState {
    pub fn new(dictionary: Option<Dictionary>, settings: Settings, hour_source: HourSource) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            dictionary: dictionary.map(Arc::new),
            settings,
            hour_source,
        }
    }
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub state: EngineState,
    pub update_count: u64,
}

/// Compute request
#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    #[serde(default)]
    pub text: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
    pub dictionary_clusters: usize,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/compute", post(compute))
        .route("/session/:id/reset", post(reset_session))
        .route("/ws/:id", get(websocket_handler))
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
        dictionary_clusters: state.dictionary.as_ref().map_or(0, |d| d.len()),
    })
}

/// Active settings
async fn get_config(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings.clone())
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let engine = FasEngine::with_settings(state.settings.clone())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .with_hour_source(state.hour_source);

    let session = Session {
        id: session_id.clone(),
        engine,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        state: session.engine.state(),
        update_count: session.engine.update_count(),
    }))
}

/// Score one message in a session
async fn compute(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ComputeRequest>,
) -> Result<Json<FasResult>, StatusCode> {
    // the write lock serializes compute calls per session
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let result = session.engine.compute(&req.text, state.dictionary.as_deref());
    let _ = session.update_tx.send(result.clone());

    Ok(Json(result))
}

/// Reset session smoothing state
async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.engine.reset();

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        state: session.engine.state(),
        update_count: 0,
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward results until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<FasResult>) {
    let (mut sink, mut stream) = socket.split();

    let mut forward = tokio::spawn(async move {
        while let Ok(result) = rx.recv().await {
            let json = serde_json::to_string(&result).unwrap_or_default();
            if sink.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });
    let mut watch_close = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => watch_close.abort(),
        _ = &mut watch_close => forward.abort(),
    }
    debug!("websocket closed");
}

static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate session ID
fn generate_session_id() -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}_{}", nanos as u64, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "fasmeter API listening");
    println!("fasmeter API running on {}", addr);
    println!("  POST /session/new          - Create session");
    println!("  GET  /session/:id          - Get state");
    println!("  POST /session/:id/compute  - Score a message");
    println!("  POST /session/:id/reset    - Reset state");
    println!("  GET  /config               - Active settings");
    println!("  WS   /ws/:id               - Live results");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

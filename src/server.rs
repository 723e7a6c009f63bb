//! HTTP splitting service: the segmenter behind a shared-secret header.
//!
//! A single substantive route, `POST /split_text_to_chunks`, accepts
//! `{"text": "..."}` and answers with a JSON array of segment strings.
//! Callers authenticate with the `X-AI-API-KEY` header, compared against a
//! secret loaded from the environment once at startup and carried in the
//! router state, with no ambient global lookup at request time.
//!
//! ## Response contract
//!
//! | Condition | Status | Body |
//! |-----------|--------|------|
//! | missing/mismatched key | 401 | `{"error": "Unauthorized"}` |
//! | missing/empty `text` | 400 | `{"error": "No text provided"}` |
//! | segmented | 200 | `["segment", ...]` |
//! | too short to segment | 200 | `[text]` (single segment) |
//! | unknown path | 404 | plain text `404 error` |
//! | handler panic | 500 | `{"error": "Internal server error", "details": ...}` |
//!
//! The auth check runs as route middleware, before the body is read, so a
//! request with a bad key gets `401` no matter what the body contains.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderName, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::tiler::TextTiler;

const SPLIT_PATH: &str = "/split_text_to_chunks";
const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-ai-api-key");

const API_KEY_ENV: &str = "X_AI_API_KEY";
const API_KEY_ENV_LEGACY: &str = "AI_API_SECRET_KEY";
const LISTEN_ADDR_ENV: &str = "TILES_LISTEN_ADDR";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Startup configuration, constructed once and passed into [`serve`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:5000`.
    pub listen_addr: String,
    /// Shared secret compared against the `X-AI-API-KEY` header.
    pub api_key: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Reads the secret from `X_AI_API_KEY`, falling back to the legacy
    /// `AI_API_SECRET_KEY` name, and the listen address from
    /// `TILES_LISTEN_ADDR` (default `0.0.0.0:5000`).
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::MissingApiKey`] if neither variable is set to
    /// a non-empty value.
    pub fn from_env() -> Result<Self, ServerError> {
        let api_key = read_env(API_KEY_ENV)
            .or_else(|| read_env(API_KEY_ENV_LEGACY))
            .ok_or(ServerError::MissingApiKey)?;
        let listen_addr =
            read_env(LISTEN_ADDR_ENV).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        Ok(Self {
            listen_addr,
            api_key,
        })
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Errors that prevent the service from starting or keep it from serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No API key in the environment; the service refuses to start open.
    #[error("no API key configured (set {API_KEY_ENV} or {API_KEY_ENV_LEGACY})")]
    MissingApiKey,
    /// The listen address did not parse.
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        /// The address that failed to parse.
        address: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// Binding the listener failed.
    #[error("failed to bind to {address}: {source}")]
    Bind {
        /// The address that could not be bound.
        address: String,
        /// The bind failure.
        #[source]
        source: std::io::Error,
    },
    /// The accept loop failed.
    #[error("server error: {source}")]
    Serve {
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

struct AppState {
    tiler: TextTiler,
    api_key: String,
}

type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
struct SplitRequest {
    #[serde(default)]
    text: Option<String>,
}

/// Per-request failures, rendered as JSON error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiError {
    Unauthorized,
    NoText,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized"})),
            )
                .into_response(),
            ApiError::NoText => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No text provided"})),
            )
                .into_response(),
        }
    }
}

/// Build the service router around a tiler and the shared secret.
pub fn build_router(tiler: TextTiler, api_key: String) -> Router {
    let state: SharedState = Arc::new(AppState { tiler, api_key });

    Router::new()
        .route(SPLIT_PATH, post(split_text_to_chunks))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(render_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http.request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_response(
                    |response: &Response, latency: std::time::Duration, span: &tracing::Span| {
                        let status = response.status().as_u16();
                        let latency_ms = latency.as_millis() as u64;
                        tracing::info!(parent: span, status, latency_ms, "request completed");
                    },
                ),
        )
        .with_state(state)
}

/// Route middleware: reject requests whose key header does not match the
/// configured secret, before any body handling.
async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(&API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if presented == Some(state.api_key.as_str()) {
        next.run(request).await
    } else {
        tracing::warn!("rejected request with missing or mismatched API key");
        ApiError::Unauthorized.into_response()
    }
}

async fn split_text_to_chunks(
    State(state): State<SharedState>,
    Json(request): Json<SplitRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let text = request.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::NoText);
    }

    let segments: Vec<String> = match state.tiler.tile(&text) {
        Ok(tiles) if !tiles.is_empty() => tiles.into_iter().map(|tile| tile.text).collect(),
        // Too short to segment: the whole input is one segment.
        Ok(_) | Err(Error::NoParagraphBreaks) => vec![text],
    };

    Ok(Json(segments))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 error").into_response()
}

fn render_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("panic");
    tracing::error!(details, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "application/json")],
        json!({"error": "Internal server error", "details": details}).to_string(),
    )
        .into_response()
}

/// Bind the listener and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns a [`ServerError`] if the address is invalid, the bind fails, or
/// the accept loop errors out.
pub async fn serve(config: ServerConfig, tiler: TextTiler) -> Result<(), ServerError> {
    let addr: SocketAddr =
        config
            .listen_addr
            .trim()
            .parse()
            .map_err(|source| ServerError::InvalidListenAddr {
                address: config.listen_addr.clone(),
                source,
            })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })?;

    tracing::info!(%addr, "tiles server listening");

    let router = build_router(tiler, config.api_key);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to capture Ctrl+C signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to capture SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
    tracing::info!("shutdown signal received");
}

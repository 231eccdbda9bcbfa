//! HTTP transport for the ui-prompt-mcp server
//!
//! Axum router carrying MCP over Streamable HTTP, the screenshot upload SSE
//! endpoint, and plain JSON health/info/metrics. Optional bearer auth guards
//! everything except `/health`.

use crate::error::{Result, UiPromptError};
use crate::prompts::Platform;
use crate::server::UiPromptServer;
use crate::server::router::{SERVER_NAME, SERVER_VERSION};
use crate::upload::{self, PIPELINE_FAILED, ProgressEvent, ProgressSink, UploadRequest, UploadedImage};
use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager,
    tower::{StreamableHttpServerConfig, StreamableHttpService},
};
use serde_json::json;
use std::{cmp::Ordering, convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Upload body limit (50 MiB)
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

const LATENCY_WINDOW: usize = 256;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub server: UiPromptServer,
    pub metrics: Arc<Mutex<HttpMetrics>>,
    pub session_mgr: Arc<LocalSessionManager>,
}

/// Metrics for HTTP server
#[derive(Debug, Clone)]
pub struct HttpMetrics {
    pub total_requests: u64,
    pub last_request_unix: u64,
    pub uploads_total: u64,
    pub errors_total: u64,
    pub latencies: Vec<f64>, // ring buffer for p95
}

impl HttpMetrics {
    fn new() -> Self {
        Self {
            total_requests: 0,
            last_request_unix: unix_now(),
            uploads_total: 0,
            errors_total: 0,
            latencies: Vec::with_capacity(LATENCY_WINDOW),
        }
    }

    fn record(&mut self, latency_ms: f64, success: bool) {
        self.latencies.push(latency_ms);
        if self.latencies.len() > LATENCY_WINDOW {
            self.latencies.remove(0);
        }
        if !success {
            self.errors_total = self.errors_total.saturating_add(1);
        }
        self.total_requests = self.total_requests.saturating_add(1);
        self.last_request_unix = unix_now();
    }

    /// (avg, p95) latency in ms
    pub fn latency_stats(&self) -> (Option<f64>, Option<f64>) {
        if self.latencies.is_empty() {
            return (None, None);
        }
        let avg = self.latencies.iter().sum::<f64>() / self.latencies.len() as f64;
        let mut sorted = self.latencies.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let p95_idx = ((sorted.len() as f64 * 0.95) as usize).min(sorted.len() - 1);
        (Some(avg), sorted.get(p95_idx).copied())
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::UNIX_EPOCH
        .elapsed()
        .unwrap_or_default()
        .as_secs()
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Info endpoint
pub async fn info_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let server = &state.server;
    let runtime = &server.config.runtime;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "server": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "transport": runtime.transport.as_str(),
                "bind": runtime.http_bind.to_string(),
                "mcp_path": runtime.http_path
            },
            "model": {
                "name": server.config.model.name,
                "available": server.model.is_some()
            },
            "components": {
                "library": server.catalog.library(),
                "version": server.catalog.version(),
                "keywords": server.catalog.dictionary().len()
            }
        })
        .to_string(),
    )
}

/// Metrics endpoint
pub async fn metrics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let metrics = state.metrics.lock().await.clone();
    let active_sessions = state.session_mgr.sessions.read().await.len();
    let (avg_latency_ms, p95_latency_ms) = metrics.latency_stats();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "metrics_version": "1",
            "total_requests": metrics.total_requests,
            "last_request_unix": metrics.last_request_unix,
            "http_active_sessions": active_sessions,
            "uploads_total": metrics.uploads_total,
            "errors_total": metrics.errors_total,
            "avg_latency_ms": avg_latency_ms,
            "p95_latency_ms": p95_latency_ms
        })
        .to_string(),
    )
}

/// `POST /upload-image`: read the form, then stream pipeline progress as SSE
pub async fn upload_image_handler(
    State(state): State<HttpState>,
    mut multipart: Multipart,
) -> Response {
    {
        let mut m = state.metrics.lock().await;
        m.uploads_total = m.uploads_total.saturating_add(1);
    }

    let form = read_upload_form(&mut multipart).await;
    let (sink, rx) = ProgressSink::channel(32);
    let server = state.server.clone();
    tokio::spawn(async move {
        match form {
            Ok(upload) => upload::process_upload(&server, upload, &sink).await,
            Err(e) => sink.error(e.to_string(), PIPELINE_FAILED).await,
        }
    });

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|event| (Ok::<Event, Infallible>(sse_event(&event)), rx))
    });
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn sse_event(event: &ProgressEvent) -> Event {
    Event::default()
        .event(event.name())
        .data(event.payload().to_string())
}

fn multipart_error(e: impl std::fmt::Display) -> UiPromptError {
    UiPromptError::Upload {
        message: format!("invalid multipart body: {}", e),
    }
}

/// Collect `image`, `platform` and `request`; unknown fields are ignored
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadRequest> {
    let mut upload = UploadRequest::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("platform") => {
                let value = field.text().await.map_err(multipart_error)?;
                upload.platform = Platform::from_form_value(&value);
            }
            Some("request") => {
                upload.request = Some(field.text().await.map_err(multipart_error)?);
            }
            other => tracing::debug!("ignoring multipart field {:?}", other),
        }
    }
    Ok(upload)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"error": {"code": 401, "message": "Unauthorized"}}).to_string(),
    )
        .into_response()
}

fn token_matches(req: &axum::http::Request<Body>, expected: &str, allow_query: bool) -> bool {
    let headers: &HeaderMap = req.headers();
    let header_ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|v| v == format!("Bearer {}", expected))
        .unwrap_or(false);
    if header_ok || !allow_query {
        return header_ok;
    }
    req.uri()
        .query()
        .map(|q| {
            q.split('&').any(|pair| {
                matches!(pair.split_once('='),
                    Some((k, v)) if (k == "access_token" || k == "token") && v == expected)
            })
        })
        .unwrap_or(false)
}

/// Build the full router for `server`
pub fn build_router(server: UiPromptServer) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let state = HttpState {
        server: server.clone(),
        metrics: Arc::new(Mutex::new(HttpMetrics::new())),
        session_mgr: session_mgr.clone(),
    };

    let runtime = &server.config.runtime;
    let path = runtime.http_path.clone();
    let keepalive = Duration::from_secs(runtime.http_sse_keepalive_sec);
    let server_factory = server.clone();
    let mcp_service: StreamableHttpService<UiPromptServer, _> = StreamableHttpService::new(
        move || Ok(server_factory.clone()),
        session_mgr,
        StreamableHttpServerConfig {
            stateful_mode: true,
            sse_keep_alive: Some(keepalive),
            ..Default::default()
        },
    );

    Router::new()
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .route("/metrics", get(metrics_handler))
        .route("/upload-image", post(upload_image_handler))
        .nest_service(path.as_str(), mcp_service)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            |State(metrics): State<Arc<Mutex<HttpMetrics>>>,
             req: axum::http::Request<Body>,
             next: axum::middleware::Next| async move {
                let tracked = !matches!(req.uri().path(), "/health" | "/metrics");
                let start = std::time::Instant::now();
                let resp = next.run(req).await;
                if tracked {
                    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
                    metrics
                        .lock()
                        .await
                        .record(latency_ms, resp.status().is_success());
                }
                resp
            },
        ))
        // Bearer auth layer; no token configured means open access
        .layer(middleware::from_fn_with_state(
            (runtime.bearer_token.clone(), runtime.allow_token_in_url),
            |State((token, allow_q)): State<(Option<String>, bool)>,
             req: axum::http::Request<Body>,
             next: axum::middleware::Next| async move {
                if req.uri().path() == "/health" {
                    return next.run(req).await;
                }
                match token {
                    None => next.run(req).await,
                    Some(expected) if token_matches(&req, &expected, allow_q) => {
                        next.run(req).await
                    }
                    Some(_) => unauthorized(),
                }
            },
        ))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(server: UiPromptServer) -> Result<()> {
    let runtime = server.config.runtime.clone();
    if runtime.allow_token_in_url {
        tracing::warn!(
            "Token authentication via query parameters is enabled; this can leak tokens in logs/proxies. Consider using Authorization header instead."
        );
    }
    if runtime.bearer_token.is_none() {
        tracing::info!("UIP_BEARER_TOKEN not set; HTTP endpoints are unauthenticated");
    }

    let app = build_router(server);

    let listener = tokio::net::TcpListener::bind(runtime.http_bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!(
        "Starting HTTP server on {} (MCP at {}, upload at /upload-image)",
        runtime.http_bind,
        runtime.http_path
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_stats_empty_and_filled() {
        let mut m = HttpMetrics::new();
        assert_eq!(m.latency_stats(), (None, None));
        for i in 1..=20 {
            m.record(i as f64, true);
        }
        m.record(5.0, false);
        let (avg, p95) = m.latency_stats();
        assert!(avg.unwrap() > 0.0);
        assert_eq!(p95, Some(19.0));
        assert_eq!(m.total_requests, 21);
        assert_eq!(m.errors_total, 1);
    }

    #[test]
    fn sub_millisecond_latencies_are_kept() {
        let mut m = HttpMetrics::new();
        m.record(0.0, true);
        m.record(0.25, true);
        m.record(0.75, true);
        assert_eq!(m.latencies.len(), 3);
        let (avg, p95) = m.latency_stats();
        assert!((avg.unwrap() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(p95, Some(0.75));
    }

    #[test]
    fn latency_window_is_bounded() {
        let mut m = HttpMetrics::new();
        for _ in 0..(LATENCY_WINDOW + 10) {
            m.record(1.0, true);
        }
        assert_eq!(m.latencies.len(), LATENCY_WINDOW);
    }

    #[test]
    fn query_token_only_when_allowed() {
        let req = axum::http::Request::builder()
            .uri("/info?token=secret")
            .body(Body::empty())
            .unwrap();
        assert!(!token_matches(&req, "secret", false));
        assert!(token_matches(&req, "secret", true));
        assert!(!token_matches(&req, "other", true));

        let req = axum::http::Request::builder()
            .uri("/info")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        assert!(token_matches(&req, "secret", false));
    }
}

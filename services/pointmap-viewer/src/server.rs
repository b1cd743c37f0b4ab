//! HTTP control and status API.
//!
//! Provides endpoints for:
//! - Status line and KPI summary
//! - Current drawing state (attached layers and view)
//! - Display parameter and toggle changes
//! - Refit requests

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use pointmap_common::{BoundingBox, PointMapError};
use pointmap_core::{ParamsUpdate, TogglesUpdate};
use serde::Serialize;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::dispatch::DispatchHandle;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefitResponse {
    /// False when there is no data to fit to.
    pub fitted: bool,
    pub region: Option<BoundingBox>,
}

// ============================================================================
// Router
// ============================================================================

/// Create the viewer API router.
pub fn create_router(handle: DispatchHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/scene", get(scene_handler))
        .route("/params", post(params_handler))
        .route("/toggles", post(toggles_handler))
        .route("/refit", post(refit_handler))
        .layer(cors)
        .layer(Extension(handle))
}

/// Serve the API until a shutdown signal is received.
pub async fn run_server(
    handle: DispatchHandle,
    port: u16,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = create_router(handle);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(port = port, "Starting viewer API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.recv().await.ok();
        })
        .await?;

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Liveness check
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "pointmap-viewer",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /status - Status line, summary, parameters and toggles
async fn status_handler(Extension(handle): Extension<DispatchHandle>) -> Response {
    match handle.state().await {
        Ok(state) => Json(state.snapshot).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /scene - Attached layers with their drawing instructions, and the view
async fn scene_handler(Extension(handle): Extension<DispatchHandle>) -> Response {
    match handle.state().await {
        Ok(state) => Json(state.scene).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /params - Change marker radius, heat radius and/or heat blur
async fn params_handler(
    Extension(handle): Extension<DispatchHandle>,
    Json(update): Json<ParamsUpdate>,
) -> Response {
    match handle.update_params(update).await {
        Ok(state) => Json(state).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /toggles - Show or hide the marker and density layers
async fn toggles_handler(
    Extension(handle): Extension<DispatchHandle>,
    Json(update): Json<TogglesUpdate>,
) -> Response {
    match handle.update_toggles(update).await {
        Ok(state) => Json(state).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /refit - Fit the view to the loaded data
async fn refit_handler(Extension(handle): Extension<DispatchHandle>) -> Response {
    match handle.refit().await {
        Ok(region) => Json(RefitResponse {
            fitted: region.is_some(),
            region,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: PointMapError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

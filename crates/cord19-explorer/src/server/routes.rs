//! Router and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dashboard::{DashboardView, FilterControls};
use crate::error::ViewError;
use crate::export;
use crate::formatters::format_dashboard_markdown;
use crate::models::{FilterQuery, FilterState};
use crate::pipeline;
use crate::source::{DataLoader, Resolved};

/// Create the HTTP router.
pub fn create_router(loader: Arc<DataLoader>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/controls", get(handle_controls))
        .route("/dashboard", get(handle_dashboard))
        .route("/report", get(handle_report))
        .route("/export", get(handle_export))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(loader)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "cord19-explorer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_controls(State(loader): State<Arc<DataLoader>>) -> impl IntoResponse {
    let resolved = loader.load();
    Json(FilterControls::from_table(&resolved.table))
}

async fn handle_dashboard(
    State(loader): State<Arc<DataLoader>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let resolved = loader.load();
    match filter_for(&resolved, &query) {
        Ok(filter) => Json(DashboardView::build(&resolved, &filter)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn handle_report(
    State(loader): State<Arc<DataLoader>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let resolved = loader.load();
    match filter_for(&resolved, &query) {
        Ok(filter) => {
            let view = DashboardView::build(&resolved, &filter);
            (
                [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
                format_dashboard_markdown(&view),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

async fn handle_export(
    State(loader): State<Arc<DataLoader>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let resolved = loader.load();
    let filter = match filter_for(&resolved, &query) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    let filtered = pipeline::apply(&resolved.table, &filter);
    match export::export_csv(&filtered) {
        Ok(body) => {
            tracing::info!(rows = filtered.len(), "Exported filtered data");
            (
                [
                    (header::CONTENT_TYPE, export::MIME_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export::FILE_NAME),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn filter_for(resolved: &Resolved, query: &FilterQuery) -> Result<FilterState, ViewError> {
    FilterControls::from_table(&resolved.table).resolve(query)
}

fn error_response(err: &ViewError) -> Response {
    let status = match err {
        ViewError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, "Rejected request");
    }
    (status, Json(json!({ "error": err.to_user_message() }))).into_response()
}

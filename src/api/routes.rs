use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, warn};

use crate::api::models::{ScanRequest, ScanResponse};
use crate::api::response;
use crate::controller::{normalize_url, FormController};
use crate::error::{AppError, Result};
use crate::view::render_page;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanForm {
    #[serde(default)]
    pub url: String,
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/api/scan", post(scan_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<String> {
    Html(render_page(&FormController::new()))
}

/// Runs one scan cycle for a form submission and renders the outcome.
async fn form_handler(
    State(state): State<AppState>,
    Form(form): Form<ScanForm>,
) -> Html<String> {
    let mut controller = FormController::new();
    controller.set_input(form.url);

    if let Err(err) = controller.submit(&state.client).await {
        // Blank input never reaches the scan service; show the idle page.
        info!(error = %err, "form submission rejected");
    }

    Html(render_page(&controller))
}

/// JSON counterpart of the form for scripted callers.
async fn scan_handler(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> impl IntoResponse {
    let start_time = std::time::Instant::now();
    let result = process_scan_request(&state, &req).await;
    info!(url = %req.url, elapsed = ?start_time.elapsed(), "scan request processed");

    match result {
        Ok(report) => response::success(report),
        Err(err) => {
            warn!(url = %req.url, error = %err, "scan request failed");
            response::error(err.status_code(), err.user_message().to_string())
        }
    }
}

async fn process_scan_request(state: &AppState, req: &ScanRequest) -> Result<ScanResponse> {
    let url = normalize_url(&req.url).ok_or(AppError::EmptyUrl)?;
    let report = state.client.scan(&url).await?;
    if report.pages_crawled == 0 {
        return Err(AppError::Unreachable);
    }
    Ok(report)
}

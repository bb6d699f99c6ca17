//! `{data, meta}` envelope returned by the JSON scan endpoint.

use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

fn meta(status: &str, code: StatusCode, message: Option<String>) -> ResponseMeta {
    ResponseMeta {
        status: status.to_string(),
        status_code: code.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        message,
    }
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: meta("success", StatusCode::OK, None),
        }),
    )
}

pub fn error<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: meta("error", status, Some(message)),
        }),
    )
}

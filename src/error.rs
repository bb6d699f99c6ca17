use axum::http::StatusCode;

/// Shown for transport, HTTP and decoding failures alike.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while scanning. Please try again or check the URL.";

/// Shown when the scan succeeded but no page could be crawled.
pub const UNREACHABLE_MESSAGE: &str =
    "Could not fetch any pages from this URL. Check that the website is reachable.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Scan failed: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("Invalid scan response: {0}")]
    Decode(String),

    #[error("No pages could be crawled")]
    Unreachable,

    #[error("No URL given")]
    EmptyUrl,

    #[error("A scan is already in progress")]
    ScanInFlight,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// The message the page shows for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Unreachable => UNREACHABLE_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Network(_) | AppError::Http { .. } | AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::Unreachable => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyUrl => StatusCode::BAD_REQUEST,
            AppError::ScanInFlight => StatusCode::CONFLICT,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

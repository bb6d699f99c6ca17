//! HTTP client for the external SEO scan service.
//!
//! One `POST {base}/api/scan` per call. There are no retries, no timeout
//! and no caching.

use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api::models::{ScanRequest, ScanResponse};
use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Clone, Debug)]
pub struct ScanClient {
    http: Client,
    base_url: String,
}

impl ScanClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/scan", self.base_url)
    }

    /// Submits `url` to the scan service as-is and parses its report.
    pub async fn scan(&self, url: &str) -> Result<ScanResponse> {
        let started = Instant::now();
        info!(url, endpoint = %self.endpoint(), "submitting scan");

        let body = ScanRequest { url: url.to_string() };
        let res = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "scan request failed");
                AppError::Network(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "scan service returned an error status");
            return Err(AppError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let report: ScanResponse = res.json().await?;
        debug!(url, elapsed = ?started.elapsed(), "scan response decoded");
        info!(
            url,
            pages_crawled = report.pages_crawled,
            overall_score = report.overall_score,
            grade = %report.grade,
            elapsed = ?started.elapsed(),
            "scan finished"
        );

        Ok(report)
    }
}

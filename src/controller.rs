//! Form state for one visitor: input text, scan lifecycle and which page
//! cards are expanded.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::api::models::ScanResponse;
use crate::client::ScanClient;
use crate::error::{AppError, Result};

/// Lifecycle of the form. `Success` and `Error` are both re-enterable.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Idle,
    Loading { url: String },
    Success(ScanResponse),
    Error(String),
}

/// Trims `raw` and prefixes `https://` when it carries no http(s) scheme.
/// Returns `None` for blank input.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    input: String,
    state: ScanState,
    open_cards: BTreeSet<usize>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            state: ScanState::Idle,
            open_cards: BTreeSet::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ScanState::Loading { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    pub fn result(&self) -> Option<&ScanResponse> {
        match &self.state {
            ScanState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ScanState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Moves into `Loading` and returns the URL to send. The previous
    /// report, error and card expansion are discarded.
    pub fn begin_scan(&mut self) -> Result<String> {
        if self.is_loading() {
            return Err(AppError::ScanInFlight);
        }
        let url = normalize_url(&self.input).ok_or(AppError::EmptyUrl)?;

        self.open_cards.clear();
        self.state = ScanState::Loading { url: url.clone() };
        Ok(url)
    }

    /// Settles a scan started by [`begin_scan`](Self::begin_scan).
    pub fn finish_scan(&mut self, outcome: Result<ScanResponse>) {
        self.state = match outcome {
            Ok(report) if report.pages_crawled == 0 => {
                warn!(url = %report.url, "scan crawled no pages");
                ScanState::Error(AppError::Unreachable.user_message().to_string())
            }
            Ok(report) => ScanState::Success(report),
            Err(err) => {
                warn!(error = %err, "scan failed");
                ScanState::Error(err.user_message().to_string())
            }
        };
    }

    /// Runs one full scan cycle against `client`.
    pub async fn submit(&mut self, client: &ScanClient) -> Result<&ScanState> {
        let url = self.begin_scan()?;
        info!(%url, "scan started");
        let outcome = client.scan(&url).await;
        self.finish_scan(outcome);
        Ok(&self.state)
    }

    /// Flips one page card. Returns the new open state, or `false` when
    /// there is no such card.
    pub fn toggle_card(&mut self, index: usize) -> bool {
        let exists = self.result().is_some_and(|r| index < r.results.len());
        if !exists {
            return false;
        }
        if self.open_cards.remove(&index) {
            false
        } else {
            self.open_cards.insert(index);
            true
        }
    }

    pub fn is_card_open(&self, index: usize) -> bool {
        self.open_cards.contains(&index)
    }
}

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

use client::ScanClient;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: ScanClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            client: ScanClient::from_config(config),
        }
    }
}

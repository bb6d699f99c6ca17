use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

/// Production scan service used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://web-production-7ce2b.up.railway.app";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let api_url = match env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            Ok(_) | Err(env::VarError::NotPresent) => DEFAULT_API_URL.to_string(),
            Err(e) => return Err(e.into()),
        };

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        Self::from_parts(&host, &port, api_url)
    }

    /// Builds a config from raw values, validating the bind address.
    pub fn from_parts(host: &str, port: &str, api_url: impl Into<String>) -> Result<Self> {
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            api_url: api_url.into(),
        })
    }
}

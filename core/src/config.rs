//! Client configuration loaded from environment variables.

use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read `FEED_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        Self::from_value(env::var("FEED_API_URL").ok())
    }

    fn from_value(value: Option<String>) -> Self {
        let base_url = value
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }
}

//! API Config

use clap::Args;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Backend base URL
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Session token sent as a bearer token
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Settings for the backend at `api_url` without a session token.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            api_timeout_seconds: 10,
        }
    }
}

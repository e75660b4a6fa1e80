use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://manilapayrollbackend-production.up.railway.app/api";

/// Every request gives up after this long. There is no retry.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_url = api_url_or_default(env::var("API_URL").ok());
        Self::new(api_url).map(|config| Self {
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            ..config
        })
    }

    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let api_url = api_url.into();
        Url::parse(&api_url).with_context(|| format!("API_URL is not a valid URL: {api_url}"))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
            log_dir: "logs".to_string(),
        })
    }

    /// Backend root used by the health check: the API base without its `/api` suffix.
    pub fn health_url(&self) -> &str {
        self.api_url
            .strip_suffix("/api")
            .unwrap_or(&self.api_url)
    }
}

/// An unset or blank `API_URL` means the hosted backend.
fn api_url_or_default(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            log_dir: "logs".to_string(),
        }
    }
}

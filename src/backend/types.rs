use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Where the workflow backend's webhooks live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://n8n.example.com`
    pub base_url: String,
    /// Webhook prefix, `/webhook` in production or `/webhook-test` in dev
    pub webhook_path: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
        }
    }

    /// Read `N8N_BASE_URL` and `N8N_WEBHOOK_PATH`
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("N8N_BASE_URL").context("Missing N8N_BASE_URL environment variable")?;
        let mut config = Self::new(base_url);
        if let Ok(path) = env::var("N8N_WEBHOOK_PATH") {
            config.webhook_path = path;
        }

        Ok(config)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.webhook_path,
            endpoint
        )
    }
}

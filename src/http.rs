//! Shared outbound HTTP client

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;

/// Build the client both provider integrations send their requests through
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.as_str())
        .build()
        .with_context(|| "Failed to create HTTP client")
}

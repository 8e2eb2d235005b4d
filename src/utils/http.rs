use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::warn;

pub fn create_client(user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// Single GET with its own timeout. Non-2xx statuses come back as errors.
pub async fn fetch(client: &Client, url: &str, timeout: Duration) -> Result<Response> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        anyhow::bail!("HTTP error {} for {}", status, url);
    }

    Ok(response)
}

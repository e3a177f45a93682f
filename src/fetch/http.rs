use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Browser-like agent; the ranking site rejects the default reqwest agent
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Create an HTTP client with a per-request timeout
pub fn create_http_client(timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// GET a URL with query parameters and return the body, failing on a non-success status
pub async fn get_text(client: &Client, url: &str, params: &[(&str, String)]) -> Result<String> {
    let resp = client
        .get(url)
        .query(params)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    let status = resp.status();
    debug!("GET {} -> {}", resp.url(), status);
    if !status.is_success() {
        bail!("{} returned status {}", url, status);
    }

    resp.text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))
}

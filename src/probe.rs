// src/probe.rs
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::FetchError;

/// HTTP client pair shared across the pipeline: the default client follows
/// redirects for availability probes and fingerprinting, the second has
/// redirects disabled for exposure verification. A redirect means the probed
/// path does not directly serve the file, and following it is exactly how
/// generic error or login pages turn into false positives.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    no_redirect: Client,
}

impl HttpClient {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        // Invalid certificates are accepted: the targets are frequently
        // misconfigured hosts, and certificate validity is not what is
        // being assessed here.
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(true)
            .build()
            .context("failed to build HTTP client")?;

        let no_redirect = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .build()
            .context("failed to build redirect-disabled HTTP client")?;

        Ok(Self { client, no_redirect })
    }

    /// HEAD availability probe. Reachable means the request completed and
    /// the status is below 400; an error page is not a usable base for the
    /// rest of the pipeline. Transport failures map to `false`.
    pub async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) if resp.status().as_u16() < 400 => true,
            Ok(resp) => {
                debug!("HEAD {} -> {}", url, resp.status());
                false
            }
            Err(err) => {
                debug!("HEAD {} failed: {}", url, FetchError::from(err));
                false
            }
        }
    }

    /// GET a page body as text, following redirects.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        resp.text().await.map_err(FetchError::from)
    }

    /// GET with redirects disabled, returning the status and raw body bytes.
    pub async fn get_raw(&self, url: &str) -> Result<(StatusCode, Vec<u8>), FetchError> {
        let resp = self.no_redirect.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        assert!(HttpClient::new(&ScanConfig::default()).is_ok());
    }
}

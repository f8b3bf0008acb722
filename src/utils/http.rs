//! HTTP client utilities.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, RequestBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::HarvestError;

/// Browser-like user agent the portal accepts
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Shared HTTP client carrying the portal session
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client without session cookies
    pub fn new() -> Result<Self, HarvestError> {
        Self::with_session(DEFAULT_USER_AGENT, &BTreeMap::new())
    }

    /// Create a client that sends the given cookies on every request
    pub fn with_session(
        user_agent: &str,
        cookies: &BTreeMap<String, String>,
    ) -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie_header(cookies) {
            let mut value = HeaderValue::from_str(&cookie)
                .map_err(|e| HarvestError::Config(format!("Invalid cookie value: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| HarvestError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }
}

/// Render a cookie map as a single `Cookie` header value
fn cookie_header(cookies: &BTreeMap<String, String>) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

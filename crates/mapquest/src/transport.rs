//! HTTP transport
//!
//! Sends a fully built request URL and decodes the JSON answer. No retries and
//! no response modelling: the body comes back as a plain [`Value`].

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{MapQuestError, TransportError};

/// Performs one GET round trip and returns the decoded JSON body
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and decode the response body as JSON
    async fn get_json(&self, url: &Url) -> Result<Value, TransportError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport with the given timeout and default headers
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if a header name or value is invalid, or the
    /// HTTP client cannot be initialized.
    pub fn new(
        timeout_secs: u64,
        headers: &BTreeMap<String, String>,
    ) -> Result<Self, MapQuestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(header_map(headers)?)
            .build()
            .map_err(|e| MapQuestError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    fn map_reqwest_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            TransportError::ConnectionFailed(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Geocoding service returned an error status");
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;
        debug!(%status, bytes = body.len(), "Received geocoding response");

        serde_json::from_slice(&body).map_err(|e| TransportError::ParseError(e.to_string()))
    }
}

/// Convert configured headers into a reqwest header map
fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, MapQuestError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| MapQuestError::Configuration(format!("header name {name:?}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| MapQuestError::Configuration(format!("header {name:?} value: {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

//! Synchronous HTTP transport for the WebSift API.
//!
//! `HttpClient` builds and sends authenticated JSON requests. When a request
//! payload carries an operation `timeout` (milliseconds), the derived
//! transport deadline is attached to that one request only; the payload goes
//! to the server unchanged.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Request, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::WebsiftError;
use crate::timeout;

/// Maximum time to wait when establishing a connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Response envelope used by the data-carrying endpoints.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: Option<bool>,
    data: Option<T>,
    error: Option<String>,
}

/// Authenticated JSON transport for a single API host.
///
/// The underlying client carries no client-wide request timeout: a request
/// whose payload has no operation timeout must go out with no explicit
/// transport deadline.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Creates a transport for the given host.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::InvalidUrl` if the base URL does not parse, or
    /// `WebsiftError::Network` if the underlying client cannot be built.
    pub(crate) fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, WebsiftError> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url)
            .map_err(|e| WebsiftError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(WebsiftError::Network)?;

        Ok(HttpClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Returns the base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a POST with a JSON payload and deserializes the full response
    /// body.
    ///
    /// If the payload carries a `timeout` field (milliseconds), the derived
    /// transport deadline is applied to this request; otherwise the request
    /// is sent with no explicit deadline. The field itself is forwarded to
    /// the server untouched.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::Timeout` when the transport deadline elapses,
    /// `WebsiftError::Network` for other transport failures, and
    /// `WebsiftError::Http` for non-2xx responses.
    pub fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, WebsiftError> {
        retry_with_backoff(|| {
            let request = self.post_request(path, body)?;
            let response = self
                .client
                .execute(request)
                .map_err(WebsiftError::from_reqwest)?;
            read_json(response)
        })
    }

    /// Sends a POST and unwraps the `{ success, data, error }` envelope.
    ///
    /// # Errors
    ///
    /// In addition to the transport errors of [`HttpClient::post`], returns
    /// `WebsiftError::Api` when the service reports a failure or the
    /// envelope has no `data`.
    pub fn post_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, WebsiftError> {
        let envelope: ApiEnvelope<T> = self.post(path, body)?;
        unwrap_envelope(envelope)
    }

    /// Sends a GET to an API path and deserializes the full response body.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, WebsiftError> {
        let url = self.endpoint(path);
        self.get_absolute(&url)
    }

    /// Sends a GET to an absolute URL, e.g. a pagination cursor returned by
    /// the API.
    pub fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T, WebsiftError> {
        retry_with_backoff(|| {
            let response = self
                .client
                .get(url)
                .bearer_auth(&self.api_key)
                .send()
                .map_err(WebsiftError::from_reqwest)?;
            read_json(response)
        })
    }

    /// Sends a DELETE to an API path and deserializes the full response body.
    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, WebsiftError> {
        retry_with_backoff(|| {
            let response = self
                .client
                .delete(self.endpoint(path))
                .bearer_auth(&self.api_key)
                .send()
                .map_err(WebsiftError::from_reqwest)?;
            read_json(response)
        })
    }

    /// Builds a POST request, deriving the transport deadline from the
    /// payload without mutating it.
    fn post_request(&self, path: &str, body: &Value) -> Result<Request, WebsiftError> {
        let mut builder = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body);

        if let Some(deadline) = timeout::transport_timeout(operation_timeout_ms(body)) {
            builder = builder.timeout(deadline);
        }

        builder.build().map_err(WebsiftError::from_reqwest)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Reads the optional operation timeout (milliseconds) from a request
/// payload. Values that are not non-negative integers count as absent.
fn operation_timeout_ms(body: &Value) -> Option<u64> {
    body.get("timeout").and_then(Value::as_u64)
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, WebsiftError> {
    let status = response.status();
    if !status.is_success() {
        return Err(WebsiftError::Http {
            status: status.as_u16(),
        });
    }
    response.json().map_err(WebsiftError::from_reqwest)
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, WebsiftError> {
    if envelope.success == Some(false) {
        return Err(WebsiftError::Api {
            message: envelope
                .error
                .unwrap_or_else(|| "request failed".to_string()),
        });
    }
    envelope.data.ok_or_else(|| WebsiftError::Api {
        message: "Missing 'data' field in API response".to_string(),
    })
}

/// Retries an operation with exponential backoff.
///
/// The operation is retried up to 3 times with delays of 1s, 2s, and 4s,
/// and only for transient failures (network errors and HTTP 5xx). Client
/// errors are surfaced immediately, as is an elapsed transport deadline:
/// the deadline derives from the caller's own operation budget, so retrying
/// would overrun it.
///
/// # Errors
///
/// Returns the result of the operation if it succeeds, or the last error if
/// all retries fail.
pub fn retry_with_backoff<F, T>(mut f: F) -> Result<T, WebsiftError>
where
    F: FnMut() -> Result<T, WebsiftError>,
{
    const MAX_RETRIES: usize = 3;
    const DELAYS: [u64; MAX_RETRIES] = [1, 2, 4]; // seconds

    let mut last_error = match f() {
        Ok(result) => return Ok(result),
        Err(e) => {
            if !should_retry(&e) {
                return Err(e);
            }
            e
        }
    };

    for &delay_secs in &DELAYS {
        thread::sleep(Duration::from_secs(delay_secs));

        match f() {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !should_retry(&e) {
                    return Err(e);
                }
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Determines if an error should be retried.
fn should_retry(error: &WebsiftError) -> bool {
    match error {
        WebsiftError::Network(_) => true,
        WebsiftError::Http { status } => {
            // Retry on 5xx server errors, not on 4xx client errors
            *status >= 500 && *status < 600
        }
        // The deadline derives from the caller's operation budget; expiry is
        // surfaced, not retried.
        WebsiftError::Timeout(_) => false,
        WebsiftError::Serialization(_)
        | WebsiftError::Api { .. }
        | WebsiftError::InvalidUrl(_)
        | WebsiftError::MissingApiKey
        | WebsiftError::JobTimeout { .. } => false,
    }
}

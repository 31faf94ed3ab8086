//! The WebSift API client.
//!
//! `WebsiftClient` is the SDK surface: scrape, search, map and crawl
//! operations over the synchronous HTTP transport. Operations whose options
//! carry an operation timeout (milliseconds) get a matching transport
//! deadline derived per request; everything else runs with no explicit
//! deadline.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::WebsiftError;
use crate::http::HttpClient;
use crate::models::{
    CancelCrawlResponse, CrawlJob, CrawlOptions, CrawlRequest, CrawlResponse, Document, MapData,
    MapOptions, MapRequest, ScrapeOptions, ScrapeRequest, SearchData, SearchOptions, SearchRequest,
};

/// Default API endpoint.
const DEFAULT_API_URL: &str = "https://api.websift.dev";

/// Seconds between status checks while waiting on a crawl job.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// Maximum seconds to wait on a crawl job before giving up.
const DEFAULT_JOB_TIMEOUT_SECS: u64 = 300;

/// Builder for constructing `WebsiftClient` instances.
///
/// # Examples
///
/// ```
/// use websift::WebsiftClientBuilder;
///
/// let client = WebsiftClientBuilder::new()
///     .api_key("ws-test-key")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct WebsiftClientBuilder {
    api_key: Option<String>,
    api_url: Option<String>,
}

impl WebsiftClientBuilder {
    /// Creates a new `WebsiftClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Builds the `WebsiftClient` with the configured settings.
    ///
    /// The API key falls back to the `WEBSIFT_API_KEY` environment variable,
    /// the base URL to `WEBSIFT_API_URL` and then to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::MissingApiKey` when no key is available, or
    /// `WebsiftError::InvalidUrl` when the base URL does not parse.
    pub fn build(self) -> Result<WebsiftClient, WebsiftError> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var("WEBSIFT_API_KEY").unwrap_or_default(),
        };
        if api_key.is_empty() {
            return Err(WebsiftError::MissingApiKey);
        }

        let api_url = if let Some(url) = self.api_url {
            url
        } else {
            std::env::var("WEBSIFT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        };

        Ok(WebsiftClient {
            http: HttpClient::new(api_url, api_key)?,
        })
    }
}

/// Synchronous client for the WebSift scraping API.
///
/// Construct one with [`WebsiftClient::builder`] or
/// [`WebsiftClient::from_env`].
pub struct WebsiftClient {
    http: HttpClient,
}

impl WebsiftClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> WebsiftClientBuilder {
        WebsiftClientBuilder::new()
    }

    /// Creates a client from the environment.
    ///
    /// Loads `.env` if present, then reads `WEBSIFT_API_KEY` and
    /// `WEBSIFT_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::MissingApiKey` when the key is not set.
    pub fn from_env() -> Result<Self, WebsiftError> {
        let _ = dotenvy::dotenv();
        Self::builder().build()
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Returns the underlying transport, for ad-hoc calls to endpoints the
    /// typed surface does not cover.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Scrapes a single URL and returns the document.
    ///
    /// When `options.timeout` (milliseconds) is set, it is forwarded to the
    /// server in the payload and the derived transport deadline is applied
    /// to this one request.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::Timeout` when the transport deadline elapses,
    /// and `WebsiftError::Api` when the service reports a failed scrape.
    pub fn scrape(&self, url: &str, options: &ScrapeOptions) -> Result<Document, WebsiftError> {
        let body = serde_json::to_value(ScrapeRequest { url, options })
            .map_err(WebsiftError::Serialization)?;
        self.http.post_data("/v2/scrape", &body)
    }

    /// Performs a web search.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchData, WebsiftError> {
        let body = serde_json::to_value(SearchRequest { query, options })
            .map_err(WebsiftError::Serialization)?;
        self.http.post_data("/v2/search", &body)
    }

    /// Discovers the URLs of a website.
    pub fn map(&self, url: &str, options: &MapOptions) -> Result<MapData, WebsiftError> {
        let body =
            serde_json::to_value(MapRequest { url, options }).map_err(WebsiftError::Serialization)?;
        self.http.post_data("/v2/map", &body)
    }

    /// Starts an async crawl job and returns immediately.
    pub fn start_crawl(
        &self,
        url: &str,
        options: &CrawlOptions,
    ) -> Result<CrawlResponse, WebsiftError> {
        let body = serde_json::to_value(CrawlRequest { url, options })
            .map_err(WebsiftError::Serialization)?;
        self.http.post("/v2/crawl", &body)
    }

    /// Gets the status and accumulated results of a crawl job.
    pub fn crawl_status(&self, id: &str) -> Result<CrawlJob, WebsiftError> {
        self.http.get(&format!("/v2/crawl/{id}"))
    }

    /// Crawls a website and waits for completion.
    ///
    /// Polls every 2 seconds for up to 5 minutes. Use
    /// [`WebsiftClient::crawl_with_polling`] for custom pacing.
    pub fn crawl(&self, url: &str, options: &CrawlOptions) -> Result<CrawlJob, WebsiftError> {
        self.crawl_with_polling(
            url,
            options,
            DEFAULT_POLL_INTERVAL_SECS,
            DEFAULT_JOB_TIMEOUT_SECS,
        )
    }

    /// Crawls a website and waits for completion with custom polling settings.
    ///
    /// # Errors
    ///
    /// Returns `WebsiftError::JobTimeout` when the job does not reach a
    /// terminal state within `timeout_secs`.
    pub fn crawl_with_polling(
        &self,
        url: &str,
        options: &CrawlOptions,
        poll_interval_secs: u64,
        timeout_secs: u64,
    ) -> Result<CrawlJob, WebsiftError> {
        let started = self.start_crawl(url, options)?;
        let deadline = Instant::now() + Duration::from_secs(timeout_secs);

        while Instant::now() < deadline {
            let job = self.crawl_status(&started.id)?;
            if job.is_done() {
                return self.paginate_crawl(job);
            }
            thread::sleep(Duration::from_secs(poll_interval_secs));
        }

        Err(WebsiftError::JobTimeout {
            id: started.id,
            seconds: timeout_secs,
        })
    }

    /// Cancels a running crawl job.
    pub fn cancel_crawl(&self, id: &str) -> Result<CancelCrawlResponse, WebsiftError> {
        self.http.delete(&format!("/v2/crawl/{id}"))
    }

    /// Follows the `next` cursor of a finished job, appending each page of
    /// documents to the result.
    fn paginate_crawl(&self, mut job: CrawlJob) -> Result<CrawlJob, WebsiftError> {
        let mut next = job.next.take();
        while let Some(url) = next {
            let page: CrawlJob = self.http.get_absolute(&url)?;
            job.data.extend(page.data);
            next = page.next;
        }
        Ok(job)
    }
}

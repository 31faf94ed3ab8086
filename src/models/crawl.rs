use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Document, ScrapeOptions};

/// Options for starting a crawl job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Maximum number of pages to crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// How many links deep to discover pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discovery_depth: Option<u32>,
    /// Only crawl paths matching these patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,
    /// Never crawl paths matching these patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    /// Scrape settings applied to every crawled page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
}

/// Reference to a crawl job accepted by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    pub id: String,
    /// Status URL for the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Lifecycle state of a crawl job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Scraping,
    Completed,
    Failed,
    Cancelled,
}

/// Status and accumulated results of a crawl job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJob {
    pub status: CrawlStatus,
    /// Pages discovered so far.
    #[serde(default)]
    pub total: u32,
    /// Pages scraped so far.
    #[serde(default)]
    pub completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_used: Option<u64>,
    /// When the job's results expire on the server.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    /// Cursor for the next page of results, when the data is paginated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default)]
    pub data: Vec<Document>,
}

impl CrawlJob {
    /// Whether the job has reached a terminal state.
    pub fn is_done(&self) -> bool {
        matches!(
            self.status,
            CrawlStatus::Completed | CrawlStatus::Failed | CrawlStatus::Cancelled
        )
    }
}

/// Response to cancelling a crawl job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelCrawlResponse {
    pub status: String,
}

/// Wire payload for `POST /v2/crawl`.
#[derive(Debug, Serialize)]
pub(crate) struct CrawlRequest<'a> {
    pub url: &'a str,
    #[serde(flatten)]
    pub options: &'a CrawlOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn crawl_job_deserializes_status_payload() {
        let job: CrawlJob = serde_json::from_value(json!({
            "success": true,
            "status": "scraping",
            "total": 10,
            "completed": 4,
            "creditsUsed": 4,
            "expiresAt": "2026-08-07T12:00:00Z",
            "data": []
        }))
        .unwrap();

        assert_eq!(job.status, CrawlStatus::Scraping);
        assert_eq!(job.total, 10);
        assert_eq!(job.completed, 4);
        assert_eq!(job.credits_used, Some(4));
        assert!(job.expires_at.is_some());
        assert!(!job.is_done());
    }

    #[test]
    fn terminal_statuses_are_done() {
        for status in [
            CrawlStatus::Completed,
            CrawlStatus::Failed,
            CrawlStatus::Cancelled,
        ] {
            let job = CrawlJob {
                status,
                total: 0,
                completed: 0,
                credits_used: None,
                expires_at: None,
                next: None,
                data: Vec::new(),
            };
            assert!(job.is_done(), "{status:?} should be terminal");
        }
    }

    #[test]
    fn crawl_job_tolerates_minimal_payload() {
        let job: CrawlJob = serde_json::from_value(json!({"status": "completed"})).unwrap();

        assert_eq!(job.status, CrawlStatus::Completed);
        assert_eq!(job.total, 0);
        assert!(job.data.is_empty());
        assert!(job.next.is_none());
    }

    #[test]
    fn request_merges_url_with_option_fields() {
        let options = CrawlOptions {
            limit: Some(50),
            ..CrawlOptions::default()
        };
        let request = CrawlRequest {
            url: "https://example.com",
            options: &options,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, json!({"url": "https://example.com", "limit": 50}));
    }
}

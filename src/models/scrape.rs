use serde::{Deserialize, Serialize};

/// Output formats the API can produce for a scraped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Format {
    Markdown,
    Html,
    RawHtml,
    Links,
    Screenshot,
    Summary,
}

/// Options for a scrape request.
///
/// `timeout` is the operation timeout in milliseconds. It is sent to the
/// server as-is; the transport deadline is derived from it separately and
/// never written back into the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    /// Formats to return. The server defaults to markdown when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,
    /// Strip navigation, footers and other boilerplate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    /// HTML tags to keep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,
    /// HTML tags to drop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
    /// Milliseconds to let the page settle before scraping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    /// Emulate a mobile viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    /// Maximum duration of the whole scrape operation, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// Wire payload for `POST /v2/scrape`: the target URL with the options
/// merged in as sibling fields.
#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub url: &'a str,
    #[serde(flatten)]
    pub options: &'a ScrapeOptions,
}

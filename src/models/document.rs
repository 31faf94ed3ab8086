use serde::{Deserialize, Serialize};

/// A scraped page in the formats the caller asked for.
///
/// Each content field is present only when the matching format was requested
/// and the scrape produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Markdown rendition of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Cleaned HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// HTML exactly as fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Hyperlinks discovered on the page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// Short summary of the page content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// URL of the captured screenshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Page-level metadata reported by the scraper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

/// Metadata the scraper extracted from a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// The URL the content was actually fetched from, after redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// HTTP status the scraper saw when fetching the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Scrape-level error reported for this page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_deserializes_from_api_response() {
        let json = r##"{
            "markdown": "# Example",
            "rawHtml": "<html></html>",
            "links": ["https://example.com/about"],
            "metadata": {
                "title": "Example",
                "sourceUrl": "https://example.com",
                "statusCode": 200
            }
        }"##;

        let document: Document = serde_json::from_str(json).unwrap();

        assert_eq!(document.markdown.as_deref(), Some("# Example"));
        assert_eq!(document.raw_html.as_deref(), Some("<html></html>"));
        assert_eq!(document.links, vec!["https://example.com/about"]);
        let metadata = document.metadata.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Example"));
        assert_eq!(metadata.source_url.as_deref(), Some("https://example.com"));
        assert_eq!(metadata.status_code, Some(200));
    }

    #[test]
    fn document_tolerates_missing_fields() {
        let document: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(document, Document::default());
    }

    #[test]
    fn document_serialization_skips_absent_fields() {
        let document = Document {
            markdown: Some("content".to_string()),
            ..Document::default()
        };

        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(json, serde_json::json!({"markdown": "content"}));
    }
}

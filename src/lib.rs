//! Rust SDK for the WebSift scraping API.
//!
//! The client is synchronous: build one with [`WebsiftClient::builder`] or
//! [`WebsiftClient::from_env`], then call the scrape, search, map and crawl
//! operations. Operation timeouts are expressed in milliseconds and converted
//! into padded transport deadlines by the [`timeout`] module.

pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod timeout;

pub use client::{WebsiftClient, WebsiftClientBuilder};
pub use error::WebsiftError;
pub use models::{
    CancelCrawlResponse, CrawlJob, CrawlOptions, CrawlResponse, CrawlStatus, Document,
    DocumentMetadata, Format, MapData, MapLink, MapOptions, ScrapeOptions, SearchData,
    SearchOptions, SearchResult,
};

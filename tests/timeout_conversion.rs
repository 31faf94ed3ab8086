//! Conversion of caller-supplied operation timeouts into transport
//! deadlines, exercised through the public surface.
//!
//! The caller expresses a timeout in milliseconds; the transport gets a
//! deadline in seconds with a fixed 5-second buffer on top. Absence must
//! propagate as absence.

use std::time::Duration;

use websift::ScrapeOptions;
use websift::timeout::{TRANSPORT_BUFFER_SECS, transport_timeout, transport_timeout_secs};

#[test]
fn scrape_timeout_converts_with_buffer() {
    assert_eq!(transport_timeout_secs(Some(60_000)), Some(65.0));
}

#[test]
fn default_scrape_timeout_converts_with_buffer() {
    assert_eq!(transport_timeout_secs(Some(30_000)), Some(35.0));
}

#[test]
fn timeout_edge_cases() {
    // 1000ms -> 1.0s + 5s buffer = 6.0s
    assert_eq!(transport_timeout_secs(Some(1_000)), Some(6.0));
    // Minimum valid timeout: 1ms -> 0.001s + 5s buffer = 5.001s
    assert_eq!(transport_timeout_secs(Some(1)), Some(5.001));
}

#[test]
fn absent_timeout_means_no_deadline() {
    assert_eq!(transport_timeout_secs(None), None);
    assert_eq!(transport_timeout(None), None);
}

#[test]
fn small_timeouts_never_undercut_the_buffer() {
    let secs = transport_timeout_secs(Some(1)).unwrap();
    assert!(secs >= TRANSPORT_BUFFER_SECS);
}

#[test]
fn deriving_the_deadline_leaves_the_payload_in_milliseconds() {
    let options = ScrapeOptions {
        timeout: Some(30_000),
        ..ScrapeOptions::default()
    };
    let body = serde_json::to_value(&options).unwrap();
    assert_eq!(body["timeout"], 30_000);

    let deadline = transport_timeout(body["timeout"].as_u64());
    assert_eq!(deadline, Some(Duration::from_secs_f64(35.0)));

    // The payload still carries the caller's milliseconds afterwards.
    assert_eq!(body["timeout"], 30_000);
}

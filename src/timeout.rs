//! Conversion of operation timeouts into transport deadlines.
//!
//! Callers express how long a whole scrape operation may take in
//! milliseconds. The HTTP transport wants its deadline in seconds, padded
//! so it never cancels a request the server would still have answered
//! within the caller's budget.

use std::time::Duration;

/// Fixed padding added on top of the caller's operation timeout, in seconds.
///
/// Covers network round-trips and server-side queueing beyond the budget the
/// caller asked for. Even a 1 ms operation timeout yields a 5.001 s
/// transport deadline.
pub const TRANSPORT_BUFFER_SECS: f64 = 5.0;

/// Converts an optional operation timeout in milliseconds into a transport
/// deadline in seconds.
///
/// A present input maps to `ms / 1000.0 + TRANSPORT_BUFFER_SECS`. An absent
/// input stays absent: the transport is given no explicit deadline rather
/// than a substituted default. Zero is a real timeout of zero duration, not
/// "unset", and converts to the buffer alone.
///
/// # Examples
///
/// ```
/// use websift::timeout::transport_timeout_secs;
///
/// assert_eq!(transport_timeout_secs(Some(60_000)), Some(65.0));
/// assert_eq!(transport_timeout_secs(None), None);
/// ```
pub fn transport_timeout_secs(operation_timeout_ms: Option<u64>) -> Option<f64> {
    operation_timeout_ms.map(|ms| ms as f64 / 1000.0 + TRANSPORT_BUFFER_SECS)
}

/// Converts an optional operation timeout in milliseconds into the
/// per-request deadline handed to the HTTP transport.
pub fn transport_timeout(operation_timeout_ms: Option<u64>) -> Option<Duration> {
    transport_timeout_secs(operation_timeout_ms).map(Duration::from_secs_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_milliseconds_to_buffered_seconds() {
        assert_eq!(transport_timeout_secs(Some(60_000)), Some(65.0));
        assert_eq!(transport_timeout_secs(Some(30_000)), Some(35.0));
        assert_eq!(transport_timeout_secs(Some(1_000)), Some(6.0));
    }

    #[test]
    fn one_millisecond_keeps_the_full_buffer() {
        assert_eq!(transport_timeout_secs(Some(1)), Some(5.001));
    }

    #[test]
    fn zero_is_a_timeout_not_unset() {
        assert_eq!(transport_timeout_secs(Some(0)), Some(TRANSPORT_BUFFER_SECS));
    }

    #[test]
    fn absent_input_stays_absent() {
        assert_eq!(transport_timeout_secs(None), None);
        assert_eq!(transport_timeout(None), None);
    }

    #[test]
    fn conversion_is_monotonic() {
        let samples = [0u64, 1, 2, 999, 1_000, 1_001, 30_000, 60_000, 3_600_000];
        for pair in samples.windows(2) {
            let lo = transport_timeout_secs(Some(pair[0])).unwrap();
            let hi = transport_timeout_secs(Some(pair[1])).unwrap();
            assert!(lo < hi, "expected {lo} < {hi} for inputs {pair:?}");
        }
    }

    #[test]
    fn buffer_is_the_lower_bound() {
        for ms in [0u64, 1, 10, 500, 1_000, 120_000] {
            let secs = transport_timeout_secs(Some(ms)).unwrap();
            assert!(secs >= TRANSPORT_BUFFER_SECS);
            if ms == 0 {
                assert_eq!(secs, TRANSPORT_BUFFER_SECS);
            } else {
                assert!(secs > TRANSPORT_BUFFER_SECS);
            }
        }
    }

    #[test]
    fn conversion_is_bitwise_deterministic() {
        for ms in [1u64, 333, 1_000, 59_999, 60_000] {
            let first = transport_timeout_secs(Some(ms)).unwrap();
            let second = transport_timeout_secs(Some(ms)).unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }

    #[test]
    fn duration_form_matches_seconds_form() {
        let secs = transport_timeout_secs(Some(30_000)).unwrap();
        let duration = transport_timeout(Some(30_000)).unwrap();
        assert_eq!(duration, Duration::from_secs_f64(secs));
        assert_eq!(duration, Duration::from_secs_f64(35.0));
    }
}

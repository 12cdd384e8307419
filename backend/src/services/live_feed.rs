//! Randomized incremental updates for the live dashboard.
//!
//! This is the only module that reads the wall clock or a randomness source,
//! and it only does so in [`sample_incremental_update`]. [`LiveFeed`] takes its
//! RNG and timestamp from the caller so tests can seed it.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::api::LiveCounters;
use crate::services::formulas::round_to;

const MAX_NEW_RESPONSES: u64 = 12;
const MIN_NEW_REQUESTS: u64 = 20;
const MAX_NEW_REQUESTS: u64 = 80;
/// At most one in this many new requests fails.
const FAILURE_DIVISOR: u64 = 20;
const NEW_SURVEY_PROBABILITY: f64 = 0.1;
const ACTIVE_SURVEY_SHIFT_PROBABILITY: f64 = 0.2;

/// Produces successive [`LiveCounters`] from an owned RNG.
pub struct LiveFeed<R: Rng> {
    rng: R,
}

impl<R: Rng> LiveFeed<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Advance `prev` by one tick observed at `now`.
    ///
    /// Cumulative counters never decrease and `last_updated` never moves
    /// backwards, even if `now` is earlier than `prev.last_updated`.
    pub fn next(&mut self, prev: &LiveCounters, now: DateTime<Utc>) -> LiveCounters {
        let new_responses = self.rng.gen_range(0..=MAX_NEW_RESPONSES);
        let new_requests = self.rng.gen_range(MIN_NEW_REQUESTS..=MAX_NEW_REQUESTS);
        let new_failures = self.rng.gen_range(0..=new_requests / FAILURE_DIVISOR);

        let total_surveys = if self.rng.gen_bool(NEW_SURVEY_PROBABILITY) {
            prev.total_surveys.saturating_add(1)
        } else {
            prev.total_surveys
        };

        let mut active_surveys = prev.active_surveys.min(total_surveys);
        if self.rng.gen_bool(ACTIVE_SURVEY_SHIFT_PROBABILITY) {
            active_surveys = if self.rng.gen_bool(0.5) {
                active_surveys.saturating_add(1).min(total_surveys)
            } else {
                active_surveys.saturating_sub(1)
            };
        }

        let api_requests = prev.api_requests.saturating_add(new_requests);
        let failed_requests = prev
            .failed_requests
            .saturating_add(new_failures)
            .min(api_requests);

        LiveCounters {
            total_surveys,
            active_surveys,
            total_responses: prev.total_responses.saturating_add(new_responses),
            api_requests,
            failed_requests,
            error_rate: error_rate(failed_requests, api_requests),
            last_updated: prev.last_updated.max(now),
        }
    }
}

/// Failed share of requests in percent, two decimals; `0` with no requests.
pub fn error_rate(failed: u64, requests: u64) -> f64 {
    if requests == 0 {
        return 0.0;
    }
    round_to(failed as f64 / requests as f64 * 100.0, 2)
}

/// One live tick using the thread RNG and the current time.
pub fn sample_incremental_update(prev: &LiveCounters) -> LiveCounters {
    let next = LiveFeed::with_rng(rand::thread_rng()).next(prev, Utc::now());
    log::debug!(
        "Live feed tick: {} responses, {} requests ({} failed)",
        next.total_responses,
        next.api_requests,
        next.failed_requests
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> LiveCounters {
        let mut counters = LiveCounters::starting_at(Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap());
        counters.total_surveys = 24;
        counters.active_surveys = 9;
        counters.total_responses = 1_830;
        counters.api_requests = 52_000;
        counters.failed_requests = 410;
        counters
    }

    #[test]
    fn test_seeded_feed_is_reproducible() {
        let prev = start();
        let now = prev.last_updated + Duration::seconds(5);
        let a = LiveFeed::with_rng(StdRng::seed_from_u64(7)).next(&prev, now);
        let b = LiveFeed::with_rng(StdRng::seed_from_u64(7)).next(&prev, now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_counters_never_decrease() {
        let mut feed = LiveFeed::with_rng(StdRng::seed_from_u64(42));
        let mut prev = start();

        for tick in 1..500 {
            let now = prev.last_updated + Duration::seconds(tick % 7);
            let next = feed.next(&prev, now);

            assert!(next.total_surveys >= prev.total_surveys);
            assert!(next.total_responses >= prev.total_responses);
            assert!(next.api_requests > prev.api_requests);
            assert!(next.failed_requests >= prev.failed_requests);
            assert!(next.failed_requests <= next.api_requests);
            assert!(next.active_surveys <= next.total_surveys);
            assert!(next.last_updated >= prev.last_updated);
            prev = next;
        }
    }

    #[test]
    fn test_clock_going_backwards_keeps_timestamp() {
        let prev = start();
        let earlier = prev.last_updated - Duration::minutes(10);
        let next = LiveFeed::with_rng(StdRng::seed_from_u64(1)).next(&prev, earlier);
        assert_eq!(next.last_updated, prev.last_updated);
    }

    #[test]
    fn test_saturates_at_max() {
        let mut prev = start();
        prev.total_responses = u64::MAX;
        prev.api_requests = u64::MAX;
        prev.failed_requests = u64::MAX;
        prev.total_surveys = u32::MAX;
        prev.active_surveys = u32::MAX;

        let next = LiveFeed::with_rng(StdRng::seed_from_u64(3)).next(&prev, prev.last_updated);
        assert_eq!(next.total_responses, u64::MAX);
        assert_eq!(next.api_requests, u64::MAX);
        assert_eq!(next.failed_requests, u64::MAX);
        assert_eq!(next.error_rate, 100.0);
    }

    #[test]
    fn test_error_rate() {
        assert_eq!(error_rate(0, 0), 0.0);
        assert_eq!(error_rate(5, 200), 2.5);
        assert_eq!(error_rate(1, 3), 33.33);
    }

    #[test]
    fn test_sample_incremental_update_advances() {
        let prev = LiveCounters::starting_at(Utc::now() - Duration::seconds(1));
        let next = sample_incremental_update(&prev);
        assert!(next.api_requests >= MIN_NEW_REQUESTS);
        assert!(next.last_updated >= prev.last_updated);
    }
}

//! Refresh timing for views that display rolling codes.
//!
//! A `RefreshClock` is a plain value owned by whichever view drives the
//! refresh, so independent windows (or tests) never share timer state.

use chrono::{DateTime, Utc};

use super::totp::PERIOD;

/// Tracks which TOTP window was last rendered.
#[derive(Debug, Default, Clone)]
pub struct RefreshClock {
    last_step: Option<i64>,
}

impl RefreshClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds until the current window ends (1..=30).
    pub fn seconds_remaining(now: DateTime<Utc>) -> u64 {
        PERIOD - now.timestamp().rem_euclid(PERIOD as i64) as u64
    }

    /// Fraction of the current window still left, from 1.0 down towards 0.0.
    pub fn progress(now: DateTime<Utc>) -> f64 {
        Self::seconds_remaining(now) as f64 / PERIOD as f64
    }

    /// Returns `true` the first time it is polled inside a new window.
    ///
    /// The very first poll always returns `true` so the caller renders an
    /// initial set of codes.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let step = now.timestamp().div_euclid(PERIOD as i64);
        if self.last_step == Some(step) {
            return false;
        }
        self.last_step = Some(step);
        true
    }
}

//! Dropping rate limiter for high-frequency pointer samples.

/// Minimum spacing between processed move samples (about one display frame).
pub const MOVE_INTERVAL_MS: f64 = 16.0;

/// Admits at most one call per interval and drops the rest.
///
/// Not a debounce: nothing is queued, so the caller always acts on the latest
/// admitted sample.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval_ms: f64,
    last: Option<f64>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MOVE_INTERVAL_MS)
    }
}

impl RateLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Returns `true` if a call at `now_ms` may run, recording it as the last
    /// admitted call.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }

    /// Forget the last admitted call so the next one always runs.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

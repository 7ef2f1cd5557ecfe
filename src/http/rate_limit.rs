//! Rate limiting
//!
//! The intranet rejects bursts, so outbound calls are paced with a governor
//! quota spread evenly over the window: `max_calls` per `window` becomes one
//! admission every `window / max_calls`, which keeps any rolling window at or
//! under `max_calls` starts. A fair mutex in front of the quota hands out
//! admissions in submission order.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::future::Future;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of calls started per window
    pub max_calls: u32,
    /// Length of the rolling window
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        // The intranet tolerates 2 requests per second; 1050ms leaves slack
        // for clock skew between client and server.
        Self {
            max_calls: 2,
            window: Duration::from_millis(1050),
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self { max_calls, window }
    }

    /// Interval between admissions
    pub fn period(&self) -> Duration {
        let calls = self.max_calls.max(1);
        let period = self.window / calls;
        period.max(Duration::from_millis(1))
    }
}

/// FIFO admission control over a paced quota
#[derive(Clone)]
pub struct RateLimiter {
    // tokio's Mutex queues waiters fairly, giving submission-order admission
    gate: Arc<Mutex<()>>,
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let period = config.period();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()));

        Self {
            gate: Arc::new(Mutex::new(())),
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a call may start
    pub async fn acquire(&self) {
        let _slot = self.gate.lock().await;
        self.limiter.until_ready().await;
    }

    /// Wait for admission, then run the task. The task's outcome (including
    /// an error) is returned as-is and never blocks later admissions.
    pub async fn admit<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        self.acquire().await;
        task.await
    }

    /// Check whether a call could start immediately
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

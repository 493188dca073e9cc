//! Process-wide request admission.
//!
//! One [`TokenBucket`] is shared by every endpoint. It holds at most `burst`
//! permits, regains `per_second` permits per second and spends one per
//! admitted request. Callers are not distinguished.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

/// Slowest supported refill. Lower or non-finite rates are raised to it.
pub const MIN_REFILL_PER_SECOND: f64 = 1.0 / 3600.0;

/// Shared rate budget. A zero burst admits nothing.
pub struct TokenBucket<C: Clock = DefaultClock> {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<C::Instant>>>,
}

impl TokenBucket<DefaultClock> {
    pub fn new(burst: u32, per_second: f64) -> Self {
        Self::with_clock(burst, per_second, &DefaultClock::default())
    }
}

impl<C: Clock> TokenBucket<C> {
    /// Creates a full bucket driven by `clock`.
    pub fn with_clock(burst: u32, per_second: f64, clock: &C) -> Self {
        let limiter = NonZeroU32::new(burst)
            .map(|burst| RateLimiter::direct_with_clock(quota(burst, per_second), clock));
        Self { limiter }
    }

    /// Spends one permit if one is available. A rejection costs nothing.
    pub fn try_admit(&self) -> bool {
        self.limiter
            .as_ref()
            .is_some_and(|limiter| limiter.check().is_ok())
    }
}

impl<C: Clock> std::fmt::Debug for TokenBucket<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucket")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}

fn quota(burst: NonZeroU32, per_second: f64) -> Quota {
    let rate = if per_second.is_finite() {
        per_second.max(MIN_REFILL_PER_SECOND)
    } else {
        MIN_REFILL_PER_SECOND
    };
    Quota::with_period(Duration::from_secs_f64(1.0 / rate))
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
        .allow_burst(burst)
}

use std::time::{Duration, Instant};

/// Per-image countdown
#[derive(Debug, Clone, Copy)]
pub struct RoundClock {
    started: Instant,
    limit: Duration,
}

impl RoundClock {
    pub fn start(limit_secs: u32) -> Self {
        Self::started_at(Instant::now(), limit_secs)
    }

    pub fn started_at(started: Instant, limit_secs: u32) -> Self {
        Self {
            started,
            limit: Duration::from_secs(limit_secs as u64),
        }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.limit
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    /// Whole seconds left, rounded up like an on-screen countdown
    pub fn remaining_secs_at(&self, now: Instant) -> u64 {
        let left = self.remaining_at(now);
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_zero()
    }

    pub fn expired(&self) -> bool {
        self.expired_at(Instant::now())
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs_at(Instant::now())
    }
}

use std::time::{Duration, Instant};

/// An absolute wake time on the monotonic clock.
///
/// Timed waits convert their relative millisecond timeout into a `Deadline`
/// once, then retry spurious wake-ups against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        // Saturate absurd timeouts rather than overflow the clock
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Duration::from_secs(u32::MAX as u64));
        Self { at }
    }

    pub fn after_millis(millis: u32) -> Self {
        Self::after(Duration::from_millis(millis as u64))
    }

    /// Time left before the deadline, or `None` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .checked_duration_since(Instant::now())
            .filter(|left| !left.is_zero())
    }

    pub fn has_expired(&self) -> bool {
        self.remaining().is_none()
    }
}

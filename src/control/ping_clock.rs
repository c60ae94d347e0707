use std::time::Instant;

/// Session-relative millisecond stamps for pings; the first stamp is 0.
#[derive(Debug, Default)]
pub struct PingClock {
    start: Option<Instant>,
}

impl PingClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { start: None }
    }

    pub fn stamp(&mut self) -> u64 {
        self.stamp_at(Instant::now())
    }

    fn stamp_at(&mut self, now: Instant) -> u64 {
        match self.start {
            None => {
                self.start = Some(now);
                0
            }
            Some(start) => {
                u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
            }
        }
    }

    /// Round trip for a pong echoing `sent_stamp`.
    pub fn rtt_ms(&mut self, sent_stamp: u64) -> u64 {
        self.stamp().saturating_sub(sent_stamp)
    }
}

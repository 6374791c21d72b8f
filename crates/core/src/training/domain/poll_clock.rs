use std::time::{Duration, Instant};

/// Time source for session polling.
///
/// Tests substitute a virtual clock so long deadlines elapse instantly.
pub trait PollClock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

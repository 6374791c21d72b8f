use std::thread;
use std::time::{Duration, Instant};

use crate::training::domain::poll_clock::PollClock;

/// Wall clock that blocks the calling thread.
pub struct SystemClock;

impl PollClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

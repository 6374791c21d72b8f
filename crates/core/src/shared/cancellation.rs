use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::shared::error::FaceApiError;

/// Caller-held cancellation signal, checked at every suspension point.
///
/// Clones share the same flag, so one clone can be handed to the client
/// while another is cancelled from a different thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also trips once the wall clock passes `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled_at(Instant::now())
    }

    /// Cancellation as seen at `now`, for callers that keep their own clock.
    pub fn is_cancelled_at(&self, now: Instant) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| now >= d)
    }

    /// Time left before the deadline trips, `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Instant::now())
    }

    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    pub(crate) fn check(&self) -> Result<(), FaceApiError> {
        if self.is_cancelled() {
            Err(FaceApiError::Cancelled)
        } else {
            Ok(())
        }
    }
}

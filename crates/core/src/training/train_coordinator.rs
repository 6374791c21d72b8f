use std::time::Instant;

use crate::recognition::infrastructure::response_parser::{parse_session, parse_train_submit};
use crate::request::domain::operation::Operation;
use crate::request::domain::request_params::RequestParams;
use crate::shared::cancellation::CancelToken;
use crate::shared::error::FaceApiError;
use crate::training::domain::poll_clock::PollClock;
use crate::training::domain::poll_policy::PollPolicy;
use crate::training::domain::train_session::{SessionInfo, TrainOutcome};
use crate::training::infrastructure::system_clock::SystemClock;
use crate::transport::dispatcher::Dispatcher;

/// Drives group training: submit, then poll the session until it reaches
/// a terminal status or the policy deadline passes.
///
/// Polling is sequential and blocks the caller. Giving up never cancels
/// the remote session.
pub struct TrainCoordinator {
    policy: PollPolicy,
    clock: Box<dyn PollClock>,
}

impl TrainCoordinator {
    pub fn new(policy: PollPolicy, clock: Box<dyn PollClock>) -> Self {
        Self { policy, clock }
    }

    /// Real-time polling with the given policy.
    pub fn with_system_clock(policy: PollPolicy) -> Self {
        Self::new(policy, Box::new(SystemClock))
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    pub fn train(&self, dispatcher: &Dispatcher, group: &str) -> Result<TrainOutcome, FaceApiError> {
        let session_id = self.submit(dispatcher, group)?;
        log::debug!("Training {group} as session {session_id}");
        self.await_session(dispatcher, &session_id)
    }

    pub fn submit(&self, dispatcher: &Dispatcher, group: &str) -> Result<String, FaceApiError> {
        let response = dispatcher.send(
            Operation::TrainIdentify,
            RequestParams::new().group_name(group),
        )?;
        parse_train_submit(&response).map_err(empty_group_as_usage)
    }

    /// One observation of `session_id`.
    pub fn poll(&self, dispatcher: &Dispatcher, session_id: &str) -> Result<SessionInfo, FaceApiError> {
        let response = dispatcher.send(
            Operation::InfoGetSession,
            RequestParams::new().session_id(session_id),
        )?;
        parse_session(&response)
    }

    pub fn await_session(
        &self,
        dispatcher: &Dispatcher,
        session_id: &str,
    ) -> Result<TrainOutcome, FaceApiError> {
        let cancel = dispatcher.cancel_token();
        let start = self.clock.now();
        let mut intervals = self.policy.intervals();

        loop {
            let info = self.poll(dispatcher, session_id)?;
            if info.status.is_terminal() {
                log::info!("Training session {session_id} finished with {}", info.status);
                return Ok(TrainOutcome {
                    session_id: info.session_id,
                    status: info.status,
                    detail: info.detail,
                });
            }

            let elapsed = self.clock.now().duration_since(start);
            if elapsed >= self.policy.deadline {
                log::warn!(
                    "Training session {session_id} still {} after {elapsed:?}; giving up",
                    info.status
                );
                return Err(FaceApiError::TrainTimeout {
                    session_id: session_id.to_string(),
                    elapsed,
                });
            }

            check_cancel(cancel, self.clock.now(), session_id)?;
            let mut wait = intervals
                .next()
                .unwrap_or(self.policy.max_interval)
                .min(self.policy.deadline - elapsed);
            if let Some(left) = cancel.remaining_at(self.clock.now()) {
                wait = wait.min(left);
            }
            log::debug!("Session {session_id} is {}; next poll in {wait:?}", info.status);

            self.clock.sleep(wait);
            check_cancel(cancel, self.clock.now(), session_id)?;
        }
    }
}

fn check_cancel(cancel: &CancelToken, now: Instant, session_id: &str) -> Result<(), FaceApiError> {
    if cancel.is_cancelled_at(now) {
        log::warn!("Stopped polling session {session_id}: cancelled");
        return Err(FaceApiError::Cancelled);
    }
    Ok(())
}

fn empty_group_as_usage(error: FaceApiError) -> FaceApiError {
    match error {
        FaceApiError::Remote(remote)
            if remote.message.to_ascii_uppercase().contains("EMPTY_GROUP") =>
        {
            FaceApiError::usage(format!(
                "group has no person with an attached face: {}",
                remote.message
            ))
        }
        other => other,
    }
}

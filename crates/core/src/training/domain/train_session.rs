use std::fmt;

/// Status of a remote training session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainStatus {
    InQueue,
    Succeeded,
    Failed,
    /// Any non-terminal status the remote reports that we don't name.
    Pending(String),
}

impl TrainStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "INQUEUE" => TrainStatus::InQueue,
            "SUCC" => TrainStatus::Succeeded,
            "FAILED" => TrainStatus::Failed,
            other => TrainStatus::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TrainStatus::Succeeded | TrainStatus::Failed)
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainStatus::InQueue => f.write_str("INQUEUE"),
            TrainStatus::Succeeded => f.write_str("SUCC"),
            TrainStatus::Failed => f.write_str("FAILED"),
            TrainStatus::Pending(raw) => f.write_str(raw),
        }
    }
}

/// One observation of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub session_id: String,
    pub status: TrainStatus,
    /// Raw JSON of the session's `result` member, when present.
    pub detail: Option<String>,
}

/// Terminal result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub session_id: String,
    pub status: TrainStatus,
    pub detail: Option<String>,
}

impl TrainOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == TrainStatus::Succeeded
    }
}

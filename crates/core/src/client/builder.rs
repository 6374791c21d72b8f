use std::time::Duration;

use crate::client::face_api_client::FaceApiClient;
use crate::shared::api_context::ApiContext;
use crate::shared::cancellation::CancelToken;
use crate::shared::constants::{DEFAULT_GROUP_LABEL, HTTP_TIMEOUT};
use crate::shared::credentials::{ConfigError, Credentials, Region, Scheme};
use crate::shared::error::FaceApiError;
use crate::training::domain::poll_clock::PollClock;
use crate::training::domain::poll_policy::PollPolicy;
use crate::training::infrastructure::system_clock::SystemClock;
use crate::training::train_coordinator::TrainCoordinator;
use crate::transport::dispatcher::Dispatcher;
use crate::transport::domain::transport::Transport;
use crate::transport::infrastructure::reqwest_transport::ReqwestTransport;

/// Collects client configuration; everything but the credentials has a default.
pub struct FaceApiClientBuilder {
    key: String,
    secret: String,
    region: Region,
    scheme: Scheme,
    base_url: Option<String>,
    default_group: String,
    poll_policy: PollPolicy,
    http_timeout: Duration,
    cancel: CancelToken,
    transport: Option<Box<dyn Transport>>,
    clock: Option<Box<dyn PollClock>>,
}

impl FaceApiClientBuilder {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            region: Region::default(),
            scheme: Scheme::default(),
            base_url: None,
            default_group: DEFAULT_GROUP_LABEL.to_string(),
            poll_policy: PollPolicy::default(),
            http_timeout: HTTP_TIMEOUT,
            cancel: CancelToken::new(),
            transport: None,
            clock: None,
        }
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Overrides the region/scheme derived base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn default_group(mut self, label: impl Into<String>) -> Self {
        self.default_group = label.into();
        self
    }

    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Per-request timeout of the built-in HTTP transport.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Signal checked before every request and around every poll sleep.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Replaces the built-in reqwest transport.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the wall clock used while polling training sessions.
    pub fn clock(mut self, clock: Box<dyn PollClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<FaceApiClient, FaceApiError> {
        let credentials = Credentials::new(self.key, self.secret)?;
        if self.default_group.trim().is_empty() {
            return Err(ConfigError::EmptyGroupLabel.into());
        }

        let mut context = ApiContext::new(credentials, self.region, self.scheme);
        if let Some(base_url) = self.base_url {
            context = context.with_base_url(base_url);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(self.http_timeout)?),
        };
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));

        log::debug!(
            "Face API client for {} (default group {})",
            context.base_url(),
            self.default_group
        );
        Ok(FaceApiClient::from_parts(
            Dispatcher::new(context, transport, self.cancel),
            TrainCoordinator::new(self.poll_policy, clock),
            self.default_group,
        ))
    }
}

use crate::request::domain::operation::Operation;
use crate::request::domain::request_params::RequestParams;
use crate::shared::api_context::ApiContext;
use crate::shared::cancellation::CancelToken;
use crate::shared::error::FaceApiError;
use crate::transport::domain::transport::{Transport, TransportResponse};

/// Authenticates, validates and sends one request per call.
///
/// Parameter validation happens before the cancellation check and before
/// any I/O, so usage errors never cost a round-trip.
pub struct Dispatcher {
    context: ApiContext,
    transport: Box<dyn Transport>,
    cancel: CancelToken,
}

impl Dispatcher {
    pub fn new(context: ApiContext, transport: Box<dyn Transport>, cancel: CancelToken) -> Self {
        Self {
            context,
            transport,
            cancel,
        }
    }

    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn send(
        &self,
        operation: Operation,
        params: RequestParams<'_>,
    ) -> Result<TransportResponse, FaceApiError> {
        let request = self.context.authenticated_request(operation, params)?;
        self.cancel.check()?;

        log::debug!(
            "POST {} ({})",
            request.url,
            if request.is_multipart() { "multipart" } else { "form" }
        );
        let response = self.transport.send(&request)?;
        log::debug!("{operation} -> HTTP {}", response.status);
        Ok(response)
    }
}

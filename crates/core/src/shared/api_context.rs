use crate::request::domain::operation::Operation;
use crate::request::domain::request_params::{EncodedRequest, RequestParams};
use crate::shared::constants::API_VERSION_PATH;
use crate::shared::credentials::{Credentials, Region, Scheme};
use crate::shared::error::FaceApiError;

/// Immutable credential and endpoint configuration.
///
/// The only capability it exposes is turning a parameter bag into an
/// authenticated request for a given operation.
#[derive(Debug, Clone)]
pub struct ApiContext {
    credentials: Credentials,
    region: Region,
    scheme: Scheme,
    base_url: String,
}

impl ApiContext {
    pub fn new(credentials: Credentials, region: Region, scheme: Scheme) -> Self {
        let base_url = format!("{}://{}/{}/", scheme.as_str(), region.host(), API_VERSION_PATH);
        Self {
            credentials,
            region,
            scheme,
            base_url,
        }
    }

    /// Points the context at a compatible proxy or mock instead of the
    /// regional host. A trailing slash is added when missing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    pub fn authenticated_request<'a>(
        &self,
        operation: Operation,
        params: RequestParams<'a>,
    ) -> Result<EncodedRequest<'a>, FaceApiError> {
        params.encode(operation, self.endpoint_url(operation), &self.credentials)
    }
}

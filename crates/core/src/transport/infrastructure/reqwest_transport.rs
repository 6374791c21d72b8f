use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::request::domain::operation::field;
use crate::request::domain::request_params::EncodedRequest;
use crate::transport::domain::transport::{Transport, TransportError, TransportResponse};

/// Blocking HTTP transport. Image requests go out as multipart, everything
/// else as a urlencoded form.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &EncodedRequest<'_>) -> Result<TransportResponse, TransportError> {
        let builder = self.client.post(&request.url);
        let builder = match &request.image {
            Some(image) => {
                let mut form = Form::new();
                for (name, value) in &request.fields {
                    form = form.text(*name, value.clone());
                }
                // reqwest needs an owned buffer for the part body.
                let part = Part::bytes(image.data.to_vec()).file_name(image.file_name.clone());
                builder.multipart(form.part(field::IMG, part))
            }
            None => builder.form(&request.fields),
        };

        let response = builder.send().map_err(|e| TransportError::Request {
            url: request.url.clone(),
            source: e,
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| TransportError::Body {
            url: request.url.clone(),
            source: e,
        })?;

        Ok(TransportResponse { status, body })
    }
}

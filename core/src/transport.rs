//! The network seam between `FeedClient` and the backend.
//!
//! A `Transport` turns an `HttpRequest` into an `HttpResponse`. Non-2xx
//! statuses are data, not errors: only failures where no response exists
//! surface as `TransportError`, split into "unreachable" and everything else.

use ureq::typestate::WithoutBody;
use ureq::{Agent, RequestBuilder};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
///
/// The agent keeps a cookie jar so credentialed sessions survive across
/// calls, and is configured so 4xx/5xx replies come back as responses.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => headers(self.agent.get(url), &request.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                headers(self.agent.post(url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => headers(self.agent.post(url), &request.headers).send_empty(),
            (HttpMethod::Delete, Some(body)) => {
                with_body_headers(self.agent.delete(url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Delete, None) => headers(self.agent.delete(url), &request.headers).call(),
        };

        let mut response = result.map_err(classify)?;
        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

fn headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// DELETE carries a body here (the caller's wallet), which ureq only sends
/// when forced.
fn with_body_headers(
    builder: RequestBuilder<WithoutBody>,
    header_list: &[(String, String)],
) -> RequestBuilder<ureq::typestate::WithBody> {
    headers(builder.force_send_body(), header_list)
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound
        | ureq::Error::Timeout(_) => TransportError::Unreachable(err.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}

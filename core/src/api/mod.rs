//! Network-backed domain clients.
//!
//! # Design
//! `Api` pairs a `FeedClient` with a `Transport`. Every call goes through
//! `Api::call`, which logs the dispatch, turns transport failures into
//! `ApiError::Network` / `ApiError::Unexpected`, and logs classified server
//! errors with their URL. The four domain clients borrow the `Api` and add
//! per-operation error logging; none of them retry or cache.

mod comments;
mod interactions;
mod posts;
mod users;

pub use comments::CommentApi;
pub use interactions::InteractionApi;
pub use posts::PostApi;
pub use users::UserApi;

use tracing::{debug, error};

use crate::client::FeedClient;
use crate::config::ApiConfig;
use crate::error::{ApiError, TransportError, NETWORK_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Shared entry point for every network call.
#[derive(Debug, Clone)]
pub struct Api<T> {
    client: FeedClient,
    transport: T,
}

impl Api<UreqTransport> {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(FeedClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> Api<T> {
    pub fn new(client: FeedClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &FeedClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn users(&self) -> UserApi<'_, T> {
        UserApi::new(self)
    }

    pub fn posts(&self) -> PostApi<'_, T> {
        PostApi::new(self)
    }

    pub fn interactions(&self) -> InteractionApi<'_, T> {
        InteractionApi::new(self)
    }

    pub fn comments(&self) -> CommentApi<'_, T> {
        CommentApi::new(self)
    }

    /// Send `request` and hand the response to `parse`.
    ///
    /// A request that failed to build is logged and returned unchanged.
    pub(crate) fn call<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&FeedClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let request = request.inspect_err(|e| error!(error = %e, "Request error"))?;
        debug!("Making {} request to {}", request.method, request.url);

        let response = self.transport.send(&request).map_err(|e| {
            match &e {
                TransportError::Unreachable(cause) => {
                    error!(cause = %cause, url = %request.url, "{NETWORK_ERROR_MESSAGE}")
                }
                TransportError::Other(cause) => {
                    error!(cause = %cause, url = %request.url, "{UNEXPECTED_ERROR_MESSAGE}")
                }
            }
            ApiError::from(e)
        })?;

        parse(&self.client, response).inspect_err(|e| {
            if let Some(status) = e.status() {
                error!(status, message = %e, url = %request.url, "API Error");
            }
        })
    }
}

use tracing::error;

use super::Api;
use crate::client::FeedClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{UpdateProfile, User};

/// Profile lookups and upserts.
pub struct UserApi<'a, T> {
    api: &'a Api<T>,
}

impl<'a, T: Transport> UserApi<'a, T> {
    pub(super) fn new(api: &'a Api<T>) -> Self {
        Self { api }
    }

    /// `GET /users/{wallet}`. A missing profile is `ApiError::NotFound`.
    pub fn get_profile(&self, wallet_address: &str) -> Result<User, ApiError> {
        let request = self.api.client().build_get_profile(wallet_address);
        self.api
            .call(Ok(request), FeedClient::parse_get_profile)
            .inspect_err(|e| error!(error = %e, "Error fetching profile"))
    }

    /// `POST /users`; the server creates or updates the profile.
    pub fn update_profile(&self, input: &UpdateProfile) -> Result<User, ApiError> {
        let request = self.api.client().build_update_profile(input);
        self.api
            .call(request, FeedClient::parse_update_profile)
            .inspect_err(|e| error!(error = %e, "Error updating profile"))
    }
}

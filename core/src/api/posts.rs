use tracing::{debug, error, info};

use super::Api;
use crate::client::FeedClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{default_username, CreatePost, Post, PostId, UpdateProfile};

/// Feed reads and post creation.
pub struct PostApi<'a, T> {
    api: &'a Api<T>,
}

impl<'a, T: Transport> PostApi<'a, T> {
    pub(super) fn new(api: &'a Api<T>) -> Self {
        Self { api }
    }

    pub fn get_feed(&self) -> Result<Vec<Post>, ApiError> {
        let request = self.api.client().build_get_feed();
        self.api
            .call(Ok(request), FeedClient::parse_get_feed)
            .inspect_err(|e| error!(error = %e, "Error fetching feed"))
    }

    pub fn get_post(&self, id: PostId) -> Result<Post, ApiError> {
        let request = self.api.client().build_get_post(id);
        self.api
            .call(Ok(request), FeedClient::parse_get_post)
            .inspect_err(|e| error!(error = %e, post_id = id, "Error fetching post"))
    }

    /// Create a post, first making sure its author has a profile.
    ///
    /// A 404 on the profile lookup provisions the user with
    /// `default_username`; any other lookup failure aborts before the post
    /// is sent.
    pub fn create_post(&self, input: &CreatePost) -> Result<Post, ApiError> {
        self.validate_and_create(input)
            .inspect_err(|e| error!(error = %e, "Error creating post"))
    }

    fn validate_and_create(&self, input: &CreatePost) -> Result<Post, ApiError> {
        if input.wallet_address.is_empty() {
            return Err(ApiError::Validation("Wallet address is required".to_string()));
        }
        if input.content.is_empty() {
            return Err(ApiError::Validation("Post content is required".to_string()));
        }

        self.ensure_user(&input.wallet_address)?;

        debug!(wallet = %input.wallet_address, "Creating post");
        let request = self.api.client().build_create_post(input);
        self.api.call(request, FeedClient::parse_create_post)
    }

    fn ensure_user(&self, wallet_address: &str) -> Result<(), ApiError> {
        let lookup = self.api.client().build_get_profile(wallet_address);
        match self.api.call(Ok(lookup), FeedClient::parse_get_profile) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                let username = default_username(wallet_address);
                info!(wallet = %wallet_address, %username, "Creating new user");
                let profile = UpdateProfile {
                    wallet_address: wallet_address.to_string(),
                    username: Some(username),
                    ..Default::default()
                };
                let request = self.api.client().build_update_profile(&profile);
                self.api.call(request, FeedClient::parse_update_profile)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

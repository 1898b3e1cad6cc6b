use tracing::error;

use super::Api;
use crate::client::FeedClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Comment, CreatePost, PostId};

/// Likes and comments addressed through the post resource.
pub struct InteractionApi<'a, T> {
    api: &'a Api<T>,
}

impl<'a, T: Transport> InteractionApi<'a, T> {
    pub(super) fn new(api: &'a Api<T>) -> Self {
        Self { api }
    }

    /// Toggle the caller's like on a post. The returned JSON is whatever the
    /// server reports as the new like state.
    pub fn like_post(&self, post_id: PostId, wallet_address: &str) -> Result<serde_json::Value, ApiError> {
        let request = self.api.client().build_like_post(post_id, wallet_address);
        self.api
            .call(request, FeedClient::parse_like_post)
            .inspect_err(|e| error!(error = %e, post_id, "Error liking post"))
    }

    pub fn comment_post(&self, post_id: PostId, input: &CreatePost) -> Result<Comment, ApiError> {
        let request = self.api.client().build_comment_post(post_id, input);
        self.api
            .call(request, FeedClient::parse_comment_post)
            .inspect_err(|e| error!(error = %e, post_id, "Error commenting on post"))
    }
}

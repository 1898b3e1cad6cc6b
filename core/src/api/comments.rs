use tracing::error;

use super::Api;
use crate::client::FeedClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Comment, NewComment};

/// Comment listing and per-comment mutations.
pub struct CommentApi<'a, T> {
    api: &'a Api<T>,
}

impl<'a, T: Transport> CommentApi<'a, T> {
    pub(super) fn new(api: &'a Api<T>) -> Self {
        Self { api }
    }

    pub fn get_comments(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        let request = self.api.client().build_get_comments(post_id);
        self.api
            .call(Ok(request), FeedClient::parse_get_comments)
            .inspect_err(|e| error!(error = %e, post_id, "Error fetching comments"))
    }

    pub fn create_comment(&self, post_id: &str, input: &NewComment) -> Result<Comment, ApiError> {
        let request = self.api.client().build_create_comment(post_id, input);
        self.api
            .call(request, FeedClient::parse_create_comment)
            .inspect_err(|e| error!(error = %e, post_id, "Error creating comment"))
    }

    /// The server checks that `wallet_address` owns the comment.
    pub fn delete_comment(&self, comment_id: &str, wallet_address: &str) -> Result<serde_json::Value, ApiError> {
        let request = self.api.client().build_delete_comment(comment_id, wallet_address);
        self.api
            .call(request, FeedClient::parse_delete_comment)
            .inspect_err(|e| error!(error = %e, comment_id, "Error deleting comment"))
    }

    pub fn like_comment(&self, comment_id: &str, wallet_address: &str) -> Result<Comment, ApiError> {
        let request = self.api.client().build_like_comment(comment_id, wallet_address);
        self.api
            .call(request, FeedClient::parse_like_comment)
            .inspect_err(|e| error!(error = %e, comment_id, "Error liking comment"))
    }

    pub fn dislike_comment(&self, comment_id: &str, wallet_address: &str) -> Result<Comment, ApiError> {
        let request = self.api.client().build_dislike_comment(comment_id, wallet_address);
        self.api
            .call(request, FeedClient::parse_dislike_comment)
            .inspect_err(|e| error!(error = %e, comment_id, "Error disliking comment"))
    }
}

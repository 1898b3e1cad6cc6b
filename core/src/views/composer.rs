use tracing::warn;

use crate::api::Api;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreatePost, Post};

/// Longest post the composer accepts, in characters.
pub const MAX_POST_CHARS: usize = 280;

/// State of the "What's on your mind?" form.
///
/// Submission is split into `begin_submit` / `finish_submit` so a caller
/// that runs the request elsewhere still sees `is_submitting` while it is in
/// flight. `submit` does both in one blocking step.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    wallet_address: Option<String>,
    content: String,
    submitting: bool,
    error: Option<String>,
}

impl Composer {
    pub fn new(wallet_address: Option<String>) -> Self {
        Self {
            wallet_address,
            ..Default::default()
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text, dropping anything past `MAX_POST_CHARS`. Editing
    /// clears a displayed error.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.chars().take(MAX_POST_CHARS).collect();
        self.error = None;
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// e.g. `12/280`
    pub fn counter(&self) -> String {
        format!("{}/{MAX_POST_CHARS}", self.char_count())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty() && !self.submitting && self.wallet_address.is_some()
    }

    /// Start a submission, returning the payload to send, or `None` when
    /// nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<CreatePost> {
        if self.content.trim().is_empty() || self.submitting {
            return None;
        }
        let Some(wallet_address) = self.wallet_address.clone() else {
            self.error = Some("Please connect your wallet first".to_string());
            return None;
        };
        self.submitting = true;
        self.error = None;
        Some(CreatePost {
            wallet_address,
            content: self.content.trim().to_string(),
        })
    }

    /// Settle a submission started by `begin_submit`. On success the form is
    /// cleared and the created post handed back for the feed to re-fetch.
    pub fn finish_submit(&mut self, result: Result<Post, ApiError>) -> Option<Post> {
        self.submitting = false;
        match result {
            Ok(post) => {
                self.content.clear();
                Some(post)
            }
            Err(e) => {
                warn!(error = %e, "post submission failed");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn submit<T: Transport>(&mut self, api: &Api<T>) -> Option<Post> {
        let input = self.begin_submit()?;
        let result = api.posts().create_post(&input);
        self.finish_submit(result)
    }
}

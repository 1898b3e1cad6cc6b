//! Comment thread under a post.
//!
//! The server's returned comment replaces the local copy after every
//! mutation, so counts always come from the server. Per-viewer like/dislike
//! flags stay local to the item.

use crate::api::Api;
use crate::transport::Transport;
use crate::types::{Comment, NewComment};

/// One rendered comment plus the viewer's local reaction flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    comment: Comment,
    is_liked: bool,
    is_disliked: bool,
}

impl CommentItem {
    pub fn new(comment: Comment) -> Self {
        Self {
            comment,
            is_liked: false,
            is_disliked: false,
        }
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    pub fn is_liked(&self) -> bool {
        self.is_liked
    }

    pub fn is_disliked(&self) -> bool {
        self.is_disliked
    }

    /// Only the author may delete.
    pub fn can_delete(&self, viewer: Option<&str>) -> bool {
        viewer == Some(self.comment.author.wallet_address.as_str())
    }

    /// Mark as liked. Returns false if it already was, meaning no call.
    fn mark_liked(&mut self) -> bool {
        if self.is_liked {
            return false;
        }
        self.is_liked = true;
        self.is_disliked = false;
        true
    }

    fn mark_disliked(&mut self) -> bool {
        if self.is_disliked {
            return false;
        }
        self.is_disliked = true;
        self.is_liked = false;
        true
    }
}

/// Comments for one post, newest submission first.
#[derive(Debug, Clone)]
pub struct CommentList {
    post_id: String,
    viewer: Option<String>,
    items: Vec<CommentItem>,
    draft: String,
    error: Option<String>,
}

impl CommentList {
    pub fn new(post_id: impl Into<String>, viewer: Option<String>) -> Self {
        Self {
            post_id: post_id.into(),
            viewer,
            items: Vec::new(),
            draft: String::new(),
            error: None,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn items(&self) -> &[CommentItem] {
        &self.items
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.viewer.is_some() && !self.draft.trim().is_empty()
    }

    /// Replace the list with the server's. A failed fetch keeps what was
    /// shown before.
    pub fn load<T: Transport>(&mut self, api: &Api<T>) -> bool {
        match api.comments().get_comments(&self.post_id) {
            Ok(comments) => {
                self.items = comments.into_iter().map(CommentItem::new).collect();
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Post the draft; the created comment goes to the top of the list.
    pub fn submit<T: Transport>(&mut self, api: &Api<T>) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Some(wallet_address) = self.viewer.clone() else {
            return false;
        };
        let input = NewComment {
            content: self.draft.clone(),
            wallet_address,
        };
        match api.comments().create_comment(&self.post_id, &input) {
            Ok(comment) => {
                self.items.insert(0, CommentItem::new(comment));
                self.draft.clear();
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn delete<T: Transport>(&mut self, api: &Api<T>, comment_id: &str) -> bool {
        let Some(viewer) = self.viewer.as_deref() else {
            return false;
        };
        match api.comments().delete_comment(comment_id, viewer) {
            Ok(_) => {
                self.items.retain(|item| item.comment.id != comment_id);
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn like<T: Transport>(&mut self, api: &Api<T>, comment_id: &str) -> bool {
        self.react(api, comment_id, Reaction::Like)
    }

    pub fn dislike<T: Transport>(&mut self, api: &Api<T>, comment_id: &str) -> bool {
        self.react(api, comment_id, Reaction::Dislike)
    }

    fn react<T: Transport>(&mut self, api: &Api<T>, comment_id: &str, reaction: Reaction) -> bool {
        let Some(viewer) = self.viewer.clone() else {
            return false;
        };
        let Some(index) = self.items.iter().position(|item| item.comment.id == comment_id) else {
            return false;
        };
        let previous = (self.items[index].is_liked, self.items[index].is_disliked);
        let changed = match reaction {
            Reaction::Like => self.items[index].mark_liked(),
            Reaction::Dislike => self.items[index].mark_disliked(),
        };
        if !changed {
            return false;
        }

        let result = match reaction {
            Reaction::Like => api.comments().like_comment(comment_id, &viewer),
            Reaction::Dislike => api.comments().dislike_comment(comment_id, &viewer),
        };
        match result {
            Ok(updated) => {
                self.items[index].comment = updated;
                self.error = None;
                true
            }
            Err(e) => {
                let item = &mut self.items[index];
                (item.is_liked, item.is_disliked) = previous;
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Reaction {
    Like,
    Dislike,
}

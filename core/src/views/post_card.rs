use crate::api::Api;
use crate::transport::Transport;
use crate::types::Post;
use crate::views::comments::CommentList;

pub const LIKE_FAILED_MESSAGE: &str = "Failed to like post. Please try again.";

/// A post in the feed as seen by one viewer.
///
/// Like state is read from the post's `likes` once, then flipped locally on
/// each acknowledged like call. The acknowledgment body is not consulted.
#[derive(Debug, Clone)]
pub struct PostCard {
    post: Post,
    viewer: String,
    is_liked: bool,
    like_count: usize,
    like_error: Option<String>,
    comments: Option<CommentList>,
}

impl PostCard {
    pub fn new(post: Post, viewer: &str) -> Self {
        let is_liked = post.is_liked_by(viewer);
        let like_count = post.likes.len();
        Self {
            post,
            viewer: viewer.to_string(),
            is_liked,
            like_count,
            like_error: None,
            comments: None,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_liked(&self) -> bool {
        self.is_liked
    }

    pub fn like_count(&self) -> usize {
        self.like_count
    }

    pub fn like_error(&self) -> Option<&str> {
        self.like_error.as_deref()
    }

    pub fn toggle_like<T: Transport>(&mut self, api: &Api<T>) -> bool {
        self.like_error = None;
        match api.interactions().like_post(self.post.id, &self.viewer) {
            Ok(_) => {
                self.like_count = if self.is_liked {
                    self.like_count.saturating_sub(1)
                } else {
                    self.like_count + 1
                };
                self.is_liked = !self.is_liked;
                true
            }
            Err(_) => {
                self.like_error = Some(LIKE_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn comments(&self) -> Option<&CommentList> {
        self.comments.as_ref()
    }

    pub fn comments_mut(&mut self) -> Option<&mut CommentList> {
        self.comments.as_mut()
    }

    /// Open or close the comment panel. Opening loads the thread; closing
    /// drops it.
    pub fn toggle_comments<T: Transport>(&mut self, api: &Api<T>) -> bool {
        if self.comments.take().is_some() {
            return false;
        }
        let viewer = Some(self.viewer.clone()).filter(|v| !v.is_empty());
        let mut list = CommentList::new(self.post.id.to_string(), viewer);
        list.load(api);
        self.comments = Some(list);
        true
    }
}

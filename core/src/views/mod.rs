//! Headless view state for the feed screens.
//!
//! Each type owns the local state of one screen element and turns user
//! actions into at most one API call, showing failures as an inline message
//! instead of propagating them. Nothing here renders.

mod comments;
mod composer;
mod feed;
mod post_card;
mod profile_card;

pub use comments::{CommentItem, CommentList};
pub use composer::{Composer, MAX_POST_CHARS};
pub use feed::FeedPage;
pub use post_card::{PostCard, LIKE_FAILED_MESSAGE};
pub use profile_card::{ProfileCard, ProfileDraft};

//! Wire DTOs for the feed API.
//!
//! # Design
//! These mirror the backend's JSON schema but are defined independently from
//! the mock-server crate. Integration tests catch drift between the two.
//! Every entity is server-owned; the client only holds the last fetched copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-issued post identifier.
pub type PostId = u64;

/// Server-issued comment identifier.
pub type CommentId = String;

/// A wallet-keyed user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub wallet_address: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

/// Membership of a wallet in a post's like set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    pub wallet_address: String,
}

/// A feed post. `likes` and `comments` may be omitted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "author")]
    pub user: User,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn is_liked_by(&self, wallet_address: &str) -> bool {
        self.likes.iter().any(|like| like.wallet_address == wallet_address)
    }
}

/// A comment on a post, with aggregate like/dislike counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: User,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Upsert payload for `POST /users`. Omitted fields are left to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateProfile {
    pub wallet_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

/// Payload for `POST /posts` and `POST /posts/{id}/comment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePost {
    pub wallet_address: String,
    pub content: String,
}

/// Payload for `POST /comments/{post_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub wallet_address: String,
}

/// Body for like, dislike and delete calls that only identify the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletBody {
    pub wallet_address: String,
}

/// Error body shape returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Username assigned when a profile is created implicitly: `user_` followed
/// by the first six characters of the wallet address.
pub fn default_username(wallet_address: &str) -> String {
    let prefix: String = wallet_address.chars().take(6).collect();
    format!("user_{prefix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_username_takes_six_chars() {
        assert_eq!(default_username("0xABCDEF123456"), "user_0xABCD");
    }

    #[test]
    fn default_username_short_address() {
        assert_eq!(default_username("0x1"), "user_0x1");
    }

    #[test]
    fn post_accepts_missing_likes_and_comments() {
        let post: Post = serde_json::from_str(
            r#"{"id":7,"content":"gm","timestamp":"2024-01-01T00:00:00Z",
                "user":{"wallet_address":"0xabc","username":"alice"}}"#,
        )
        .unwrap();
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
        assert_eq!(post.user.bio, None);
    }

    #[test]
    fn post_accepts_author_alias() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"content":"x","timestamp":"2024-01-01T00:00:00Z",
                "author":{"wallet_address":"0xabc","username":"alice"},
                "likes":[{"wallet_address":"0xdef"}]}"#,
        )
        .unwrap();
        assert_eq!(post.user.username, "alice");
        assert!(post.is_liked_by("0xdef"));
        assert!(!post.is_liked_by("0xabc"));
    }

    #[test]
    fn comment_uses_camel_case_created_at() {
        let comment: Comment = serde_json::from_str(
            r#"{"id":"c1","content":"gm","author":{"wallet_address":"0xabc","username":"a"},
                "likes":2,"dislikes":1,"createdAt":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(comment.likes, 2);
        let json = serde_json::to_value(&comment).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn update_profile_skips_absent_fields() {
        let input = UpdateProfile {
            wallet_address: "0xabc".to_string(),
            username: Some("alice".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("bio").is_none());
        assert!(json.get("profile_pic_url").is_none());
    }
}

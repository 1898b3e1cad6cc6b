//! Stateless HTTP request builder and response parser for the feed API.
//!
//! # Design
//! `FeedClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Status classification happens in `parse_*`:
//! any 2xx is success, 404 becomes `ApiError::NotFound`, everything else
//! becomes `ApiError::Server`, each carrying the body's `message` or a
//! generic fallback.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Comment, CreatePost, ErrorBody, NewComment, Post, PostId, UpdateProfile, User, WalletBody,
};

/// Synchronous, stateless client for the feed API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn json<B: Serialize>(&self, method: HttpMethod, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::with_json(method, self.url(path), body))
    }

    // --- users ---

    pub fn build_get_profile(&self, wallet_address: &str) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/users/{wallet_address}")))
    }

    pub fn build_update_profile(&self, input: &UpdateProfile) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/users", input)
    }

    pub fn parse_get_profile(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_profile(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response)
    }

    // --- posts ---

    pub fn build_get_feed(&self) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url("/posts"))
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/posts", input)
    }

    pub fn build_get_post(&self, id: PostId) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/posts/{id}")))
    }

    pub fn parse_get_feed(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    // --- interactions ---

    pub fn build_like_post(&self, id: PostId, wallet_address: &str) -> Result<HttpRequest, ApiError> {
        let body = WalletBody {
            wallet_address: wallet_address.to_string(),
        };
        self.json(HttpMethod::Post, &format!("/posts/{id}/like"), &body)
    }

    pub fn build_comment_post(&self, id: PostId, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, &format!("/posts/{id}/comment"), input)
    }

    /// The like acknowledgment's shape is server-defined, so it is returned
    /// as raw JSON.
    pub fn parse_like_post(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_value(response)
    }

    pub fn parse_comment_post(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    // --- comments ---

    pub fn build_get_comments(&self, post_id: &str) -> HttpRequest {
        HttpRequest::without_body(HttpMethod::Get, self.url(&format!("/comments/post/{post_id}")))
    }

    pub fn build_create_comment(&self, post_id: &str, input: &NewComment) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, &format!("/comments/{post_id}"), input)
    }

    /// The wallet address travels in the body so the server can check
    /// ownership.
    pub fn build_delete_comment(&self, comment_id: &str, wallet_address: &str) -> Result<HttpRequest, ApiError> {
        let body = WalletBody {
            wallet_address: wallet_address.to_string(),
        };
        self.json(HttpMethod::Delete, &format!("/comments/{comment_id}"), &body)
    }

    pub fn build_like_comment(&self, comment_id: &str, wallet_address: &str) -> Result<HttpRequest, ApiError> {
        let body = WalletBody {
            wallet_address: wallet_address.to_string(),
        };
        self.json(HttpMethod::Post, &format!("/comments/{comment_id}/like"), &body)
    }

    pub fn build_dislike_comment(&self, comment_id: &str, wallet_address: &str) -> Result<HttpRequest, ApiError> {
        let body = WalletBody {
            wallet_address: wallet_address.to_string(),
        };
        self.json(HttpMethod::Post, &format!("/comments/{comment_id}/dislike"), &body)
    }

    pub fn parse_get_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_comment(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_value(response)
    }

    pub fn parse_like_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }

    pub fn parse_dislike_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        parse_json(response)
    }
}

/// Map non-2xx responses to `ApiError`, pulling `message` out of the body.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Like `parse_json`, but an empty body is an acknowledgment, not an error.
fn parse_value(response: HttpResponse) -> Result<serde_json::Value, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FeedClient {
        FeedClient::new("http://localhost:3000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn body_of(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn build_get_profile_produces_correct_request() {
        let req = client().build_get_profile("0xabc");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/users/0xabc");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_update_profile_posts_to_users() {
        let input = UpdateProfile {
            wallet_address: "0xabc".to_string(),
            bio: Some("gm".to_string()),
            ..Default::default()
        };
        let req = client().build_update_profile(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/users");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body = body_of(&req);
        assert_eq!(body["wallet_address"], "0xabc");
        assert_eq!(body["bio"], "gm");
        assert!(body.get("username").is_none());
    }

    #[test]
    fn build_like_post_carries_wallet() {
        let req = client().build_like_post(42, "0xabc").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/posts/42/like");
        assert_eq!(body_of(&req), serde_json::json!({"wallet_address": "0xabc"}));
    }

    #[test]
    fn build_delete_comment_sends_wallet_in_body() {
        let req = client().build_delete_comment("c-1", "0xabc").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/comments/c-1");
        assert_eq!(body_of(&req), serde_json::json!({"wallet_address": "0xabc"}));
    }

    #[test]
    fn build_comment_paths() {
        let c = client();
        assert_eq!(c.build_get_comments("9").url, "http://localhost:3000/api/comments/post/9");
        let input = NewComment {
            content: "gm".to_string(),
            wallet_address: "0xabc".to_string(),
        };
        assert_eq!(
            c.build_create_comment("9", &input).unwrap().url,
            "http://localhost:3000/api/comments/9"
        );
        assert_eq!(
            c.build_dislike_comment("c-1", "0xabc").unwrap().url,
            "http://localhost:3000/api/comments/c-1/dislike"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = FeedClient::new("http://localhost:3000/api/");
        assert_eq!(client.build_get_feed().url, "http://localhost:3000/api/posts");
    }

    #[test]
    fn parse_get_feed_success() {
        let feed = client()
            .parse_get_feed(response(
                200,
                r#"[{"id":1,"content":"hello","timestamp":"2024-01-01T00:00:00Z",
                     "user":{"wallet_address":"0xabc","username":"alice"}}]"#,
            ))
            .unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].content, "hello");
    }

    #[test]
    fn created_status_is_success() {
        let post = client()
            .parse_create_post(response(
                201,
                r#"{"id":3,"content":"gm","timestamp":"2024-01-01T00:00:00Z",
                    "user":{"wallet_address":"0xabc","username":"alice"}}"#,
            ))
            .unwrap();
        assert_eq!(post.id, 3);
    }

    #[test]
    fn not_found_keeps_server_message() {
        let err = client()
            .parse_get_profile(response(404, r#"{"message":"not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "not found"));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn server_error_without_message_falls_back() {
        let err = client().parse_get_feed(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn empty_message_falls_back() {
        let err = client()
            .parse_get_feed(response(400, r#"{"message":""}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn delete_ack_may_be_empty() {
        let ack = client().parse_delete_comment(response(204, "")).unwrap();
        assert!(ack.is_null());
    }

    #[test]
    fn bad_json_is_deserialization_error() {
        let err = client().parse_get_post(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}

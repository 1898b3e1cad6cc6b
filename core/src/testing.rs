//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::api::Api;
use crate::client::FeedClient;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub(crate) const BASE_URL: &str = "http://localhost:3000/api";

/// Replays queued replies in order and records every request it sees.
/// A request with nothing queued fails the test.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn unreachable(self) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Unreachable("connection refused".to_string())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url))
    }
}

pub(crate) fn api(transport: ScriptedTransport) -> Api<ScriptedTransport> {
    Api::new(FeedClient::new(BASE_URL), transport)
}

pub(crate) fn user_json(wallet: &str, username: &str) -> String {
    format!(r#"{{"wallet_address":"{wallet}","username":"{username}"}}"#)
}

pub(crate) fn post_json(id: u64, content: &str, author: &str, likes: &[&str]) -> String {
    let likes: Vec<String> = likes
        .iter()
        .map(|w| format!(r#"{{"wallet_address":"{w}"}}"#))
        .collect();
    format!(
        r#"{{"id":{id},"content":"{content}","timestamp":"2024-01-01T00:00:00Z","user":{},"likes":[{}]}}"#,
        user_json(author, "author"),
        likes.join(",")
    )
}

pub(crate) fn comment_json(id: &str, content: &str, author: &str, likes: u64, dislikes: u64) -> String {
    format!(
        r#"{{"id":"{id}","content":"{content}","author":{},"likes":{likes},"dislikes":{dislikes},"createdAt":"2024-01-01T00:00:00Z"}}"#,
        user_json(author, "author")
    )
}

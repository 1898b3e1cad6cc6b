//! Client for a wallet-authenticated social feed API.
//!
//! # Overview
//! Users are keyed by wallet address. The backend owns every entity; this
//! crate builds requests, classifies responses into one error taxonomy, and
//! keeps the view-local state the feed screens need.
//!
//! # Design
//! - `FeedClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. No I/O happens there.
//! - `Transport` executes the round-trip; `UreqTransport` is the real one.
//! - `Api` wires the two together and exposes the user, post, interaction
//!   and comment clients. Post creation provisions a missing author first.
//! - `views` holds headless state for the composer, post cards, profile
//!   card, comment threads and the feed page.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

pub use api::{Api, CommentApi, InteractionApi, PostApi, UserApi};
pub use client::FeedClient;
pub use config::ApiConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    default_username, Comment, CommentId, CreatePost, Like, NewComment, Post, PostId, UpdateProfile, User,
    WalletBody,
};

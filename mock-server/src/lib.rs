//! In-memory stand-in for the feed backend.
//!
//! Serves the REST contract the client consumes under `/api`, with error
//! bodies shaped `{"message": ...}`. State lives in one `RwLock`ed store and
//! is lost on restart.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const MAX_POST_CHARS: usize = 280;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub wallet_address: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Like {
    pub wallet_address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author: User,
    pub likes: usize,
    pub dislikes: usize,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub user: User,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

#[derive(Deserialize)]
pub struct UpsertUser {
    pub wallet_address: String,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
}

#[derive(Deserialize)]
pub struct WalletContent {
    pub wallet_address: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct WalletOnly {
    pub wallet_address: String,
}

struct PostRecord {
    id: u64,
    content: String,
    timestamp: DateTime<Utc>,
    author: String,
    likes: BTreeSet<String>,
}

struct CommentRecord {
    id: Uuid,
    post_id: u64,
    content: String,
    author: String,
    likes: BTreeSet<String>,
    dislikes: BTreeSet<String>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    next_post_id: u64,
}

impl Store {
    fn user(&self, wallet: &str) -> Result<&User, AppError> {
        self.users
            .get(wallet)
            .ok_or_else(|| AppError::bad_request("User does not exist"))
    }

    fn post(&self, id: u64) -> Result<&PostRecord, AppError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    fn comment_view(&self, record: &CommentRecord) -> Comment {
        Comment {
            id: record.id,
            content: record.content.clone(),
            author: self.users.get(&record.author).cloned().unwrap_or_else(|| User {
                wallet_address: record.author.clone(),
                username: String::new(),
                bio: None,
                profile_pic_url: None,
            }),
            likes: record.likes.len(),
            dislikes: record.dislikes.len(),
            created_at: record.created_at,
        }
    }

    /// Comments for a post, newest first.
    fn comments_for(&self, post_id: u64) -> Vec<Comment> {
        self.comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id)
            .map(|c| self.comment_view(c))
            .collect()
    }

    fn post_view(&self, record: &PostRecord) -> Post {
        Post {
            id: record.id,
            content: record.content.clone(),
            timestamp: record.timestamp,
            user: self.users.get(&record.author).cloned().unwrap_or_else(|| User {
                wallet_address: record.author.clone(),
                username: String::new(),
                bio: None,
                profile_pic_url: None,
            }),
            likes: record
                .likes
                .iter()
                .map(|w| Like { wallet_address: w.clone() })
                .collect(),
            comments: self.comments_for(record.id),
        }
    }

    fn add_comment(&mut self, post_id: u64, wallet: &str, content: &str) -> Result<Comment, AppError> {
        self.post(post_id)?;
        self.user(wallet)?;
        if content.trim().is_empty() {
            return Err(AppError::bad_request("Comment content is required"));
        }
        let record = CommentRecord {
            id: Uuid::new_v4(),
            post_id,
            content: content.to_string(),
            author: wallet.to_string(),
            likes: BTreeSet::new(),
            dislikes: BTreeSet::new(),
            created_at: Utc::now(),
        };
        let view = self.comment_view(&record);
        self.comments.push(record);
        Ok(view)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// A non-2xx reply with a `{"message": ...}` body.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/users", post(upsert_user))
        .route("/users/{wallet}", get(get_user))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/like", post(like_post))
        .route("/posts/{id}/comment", post(comment_post))
        .route("/comments/post/{id}", get(list_comments))
        .route("/comments/{id}", post(create_comment).delete(delete_comment))
        .route("/comments/{id}/like", post(like_comment))
        .route("/comments/{id}/dislike", post(dislike_comment))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_user(State(db): State<Db>, Path(wallet): Path<String>) -> Result<Json<User>, AppError> {
    let store = db.read().await;
    store
        .users
        .get(&wallet)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("User not found"))
}

async fn upsert_user(State(db): State<Db>, Json(input): Json<UpsertUser>) -> Result<Json<User>, AppError> {
    if input.wallet_address.is_empty() {
        return Err(AppError::bad_request("wallet_address is required"));
    }
    let mut store = db.write().await;
    let user = match store.users.get_mut(&input.wallet_address) {
        Some(user) => {
            if let Some(username) = input.username {
                user.username = username;
            }
            if input.bio.is_some() {
                user.bio = input.bio;
            }
            if input.profile_pic_url.is_some() {
                user.profile_pic_url = input.profile_pic_url;
            }
            user.clone()
        }
        None => {
            let username = input
                .username
                .filter(|u| !u.is_empty())
                .ok_or_else(|| AppError::bad_request("Username is required"))?;
            let user = User {
                wallet_address: input.wallet_address.clone(),
                username,
                bio: input.bio,
                profile_pic_url: input.profile_pic_url,
            };
            tracing::info!(wallet = %user.wallet_address, "user created");
            store.users.insert(input.wallet_address, user.clone());
            user
        }
    };
    Ok(Json(user))
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.iter().rev().map(|p| store.post_view(p)).collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<WalletContent>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let mut store = db.write().await;
    store.user(&input.wallet_address)?;
    if input.content.trim().is_empty() {
        return Err(AppError::bad_request("Content is required"));
    }
    if input.content.chars().count() > MAX_POST_CHARS {
        return Err(AppError::bad_request("Post exceeds 280 characters"));
    }
    store.next_post_id += 1;
    let record = PostRecord {
        id: store.next_post_id,
        content: input.content,
        timestamp: Utc::now(),
        author: input.wallet_address,
        likes: BTreeSet::new(),
    };
    let view = store.post_view(&record);
    store.posts.push(record);
    tracing::info!(post_id = view.id, "post created");
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, AppError> {
    let store = db.read().await;
    let record = store.post(id)?;
    Ok(Json(store.post_view(record)))
}

async fn like_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<WalletOnly>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut store = db.write().await;
    let record = store
        .posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found("Post not found"))?;
    let liked = if record.likes.remove(&input.wallet_address) {
        false
    } else {
        record.likes.insert(input.wallet_address);
        true
    };
    Ok(Json(json!({ "liked": liked, "likes": record.likes.len() })))
}

async fn comment_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<WalletContent>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let mut store = db.write().await;
    let comment = store.add_comment(id, &input.wallet_address, &input.content)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn list_comments(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Vec<Comment>>, AppError> {
    let store = db.read().await;
    store.post(id)?;
    Ok(Json(store.comments_for(id)))
}

async fn create_comment(
    State(db): State<Db>,
    Path(post_id): Path<u64>,
    Json(input): Json<WalletContent>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let mut store = db.write().await;
    let comment = store.add_comment(post_id, &input.wallet_address, &input.content)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn delete_comment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<WalletOnly>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut store = db.write().await;
    let index = store
        .comments
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| AppError::not_found("Comment not found"))?;
    if store.comments[index].author != input.wallet_address {
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            "Only the author can delete this comment",
        ));
    }
    store.comments.remove(index);
    Ok(Json(json!({ "message": "Comment deleted" })))
}

async fn like_comment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<WalletOnly>,
) -> Result<Json<Comment>, AppError> {
    react(db, id, input.wallet_address, true).await
}

async fn dislike_comment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<WalletOnly>,
) -> Result<Json<Comment>, AppError> {
    react(db, id, input.wallet_address, false).await
}

/// Likes and dislikes are exclusive per wallet and idempotent.
async fn react(db: Db, id: Uuid, wallet: String, like: bool) -> Result<Json<Comment>, AppError> {
    let mut store = db.write().await;
    let record = store
        .comments
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::not_found("Comment not found"))?;
    if like {
        record.dislikes.remove(&wallet);
        record.likes.insert(wallet);
    } else {
        record.likes.remove(&wallet);
        record.dislikes.insert(wallet);
    }
    let store = &*store;
    let record = store
        .comments
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::not_found("Comment not found"))?;
    Ok(Json(store.comment_view(record)))
}

use anyhow::{anyhow, bail, Context};
use clap::Subcommand;
use feed_core::views::{CommentItem, CommentList, Composer, PostCard, ProfileCard, MAX_POST_CHARS};
use feed_core::{Api, Post, Transport};

#[derive(Subcommand)]
pub enum Command {
    /// Show the feed
    Feed,
    /// Show one post with its comments
    Show { id: u64 },
    /// Publish a post (at most 280 characters)
    Post { content: String },
    /// Like or unlike a post
    Like { id: u64 },
    /// List comments on a post
    Comments { post_id: u64 },
    /// Comment on a post
    Comment { post_id: u64, content: String },
    /// Delete one of your comments
    DeleteComment { post_id: u64, comment_id: String },
    /// Like a comment
    LikeComment { post_id: u64, comment_id: String },
    /// Dislike a comment
    DislikeComment { post_id: u64, comment_id: String },
    /// Show a profile (defaults to your own)
    Profile { wallet: Option<String> },
    /// Update your profile
    EditProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
}

pub fn run<T: Transport>(api: &Api<T>, wallet: Option<&str>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Feed => {
            let posts = api.posts().get_feed()?;
            if posts.is_empty() {
                println!("No posts yet.");
            }
            for post in &posts {
                print_post(post, wallet);
            }
        }
        Command::Show { id } => {
            let post = api.posts().get_post(id)?;
            print_post(&post, wallet);
            for comment in &post.comments {
                print_comment(&CommentItem::new(comment.clone()));
            }
        }
        Command::Post { content } => {
            let mut composer = compose(require(wallet)?, &content)?;
            match composer.submit(api) {
                Some(post) => println!("Posted #{}", post.id),
                None => bail!(composer.error().unwrap_or("Nothing to post").to_string()),
            }
        }
        Command::Like { id } => {
            let wallet = require(wallet)?;
            let mut card = PostCard::new(api.posts().get_post(id)?, wallet);
            if !card.toggle_like(api) {
                bail!(card.like_error().unwrap_or_default().to_string());
            }
            let verb = if card.is_liked() { "Liked" } else { "Unliked" };
            println!("{verb} #{id} ({} likes)", card.like_count());
        }
        Command::Comments { post_id } => {
            let list = loaded_comments(api, post_id, wallet)?;
            if list.items().is_empty() {
                println!("No comments yet.");
            }
            for item in list.items() {
                print_comment(item);
            }
        }
        Command::Comment { post_id, content } => {
            let mut list = CommentList::new(post_id.to_string(), Some(require(wallet)?.to_string()));
            list.set_draft(&content);
            if !list.submit(api) {
                bail!(list.error().unwrap_or("Nothing to comment").to_string());
            }
            if let Some(item) = list.items().first() {
                print_comment(item);
            }
        }
        Command::DeleteComment { post_id, comment_id } => {
            require(wallet)?;
            let mut list = loaded_comments(api, post_id, wallet)?;
            if !list.delete(api, &comment_id) {
                bail!(list.error().unwrap_or_default().to_string());
            }
            println!("Deleted {comment_id}");
        }
        Command::LikeComment { post_id, comment_id } => react(api, wallet, post_id, &comment_id, true)?,
        Command::DislikeComment { post_id, comment_id } => react(api, wallet, post_id, &comment_id, false)?,
        Command::Profile { wallet: target } => {
            let target = target.as_deref().or(wallet).context("no wallet given")?;
            let user = api.users().get_profile(target)?;
            println!("{} ({})", user.username, user.wallet_address);
            if let Some(bio) = user.bio.filter(|b| !b.is_empty()) {
                println!("{bio}");
            }
        }
        Command::EditProfile { username, bio, avatar } => {
            let wallet = require(wallet)?;
            let mut card = own_profile_card(api, wallet)?;
            card.start_editing();
            if let Some(draft) = card.draft_mut() {
                if let Some(username) = username {
                    draft.username = username;
                }
                if let Some(bio) = bio {
                    draft.bio = bio;
                }
                if let Some(avatar) = avatar {
                    draft.profile_pic_url = avatar;
                }
            }
            let user = card
                .save(api)
                .ok_or_else(|| anyhow!(card.error().unwrap_or_default().to_string()))?;
            println!("Saved profile for {}", user.username);
        }
    }
    Ok(())
}

fn require(wallet: Option<&str>) -> anyhow::Result<&str> {
    wallet.context("Please connect your wallet first (pass --wallet or set FEED_WALLET)")
}

/// A one-shot post is refused rather than cut to fit.
fn compose(wallet: &str, content: &str) -> anyhow::Result<Composer> {
    let length = content.chars().count();
    if length > MAX_POST_CHARS {
        bail!("Post is too long ({length}/{MAX_POST_CHARS})");
    }
    let mut composer = Composer::new(Some(wallet.to_string()));
    composer.set_content(content);
    Ok(composer)
}

/// The wallet's saved profile, or the defaults when it has none yet.
fn own_profile_card<T: Transport>(api: &Api<T>, wallet: &str) -> anyhow::Result<ProfileCard> {
    match api.users().get_profile(wallet) {
        Ok(user) => Ok(ProfileCard::new(wallet, Some(&user))),
        Err(e) if e.is_not_found() => Ok(ProfileCard::new(wallet, None)),
        Err(e) => Err(e.into()),
    }
}

fn loaded_comments<T: Transport>(api: &Api<T>, post_id: u64, wallet: Option<&str>) -> anyhow::Result<CommentList> {
    let mut list = CommentList::new(post_id.to_string(), wallet.map(str::to_string));
    if !list.load(api) {
        bail!(list.error().unwrap_or_default().to_string());
    }
    Ok(list)
}

fn react<T: Transport>(
    api: &Api<T>,
    wallet: Option<&str>,
    post_id: u64,
    comment_id: &str,
    like: bool,
) -> anyhow::Result<()> {
    require(wallet)?;
    let mut list = loaded_comments(api, post_id, wallet)?;
    let done = if like {
        list.like(api, comment_id)
    } else {
        list.dislike(api, comment_id)
    };
    if !done {
        bail!(list.error().unwrap_or("Comment not found on this post").to_string());
    }
    if let Some(item) = list.items().iter().find(|item| item.comment().id == comment_id) {
        print_comment(item);
    }
    Ok(())
}

fn print_post(post: &Post, viewer: Option<&str>) {
    let heart = match viewer {
        Some(wallet) if post.is_liked_by(wallet) => "♥",
        _ => "♡",
    };
    println!(
        "#{} {} · {}\n  {}\n  {heart} {}  comments: {}",
        post.id,
        post.user.username,
        post.timestamp.format("%Y-%m-%d"),
        post.content,
        post.likes.len(),
        post.comments.len()
    );
}

fn print_comment(item: &CommentItem) {
    let comment = item.comment();
    println!(
        "[{}] {}: {}  (+{} / -{})",
        comment.id, comment.author.username, comment.content, comment.likes, comment.dislikes
    );
}

use crate::api::Api;
use crate::transport::Transport;
use crate::types::{Post, User};
use crate::views::{Composer, PostCard, ProfileCard};

/// Top-level page: the connected wallet, its profile and the feed.
///
/// Nothing is fetched until a wallet is connected. Fetch failures are logged
/// by the API layer and leave the previous data on screen.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    wallet_address: Option<String>,
    posts: Vec<Post>,
    profile: Option<User>,
}

impl FeedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet_address.is_some()
    }

    pub fn connect<T: Transport>(&mut self, api: &Api<T>, wallet_address: &str) {
        self.wallet_address = Some(wallet_address.to_string());
        self.refresh(api);
    }

    pub fn disconnect(&mut self) {
        *self = Self::default();
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    pub fn refresh<T: Transport>(&mut self, api: &Api<T>) {
        if !self.is_connected() {
            return;
        }
        self.refresh_posts(api);
        self.refresh_profile(api);
    }

    pub fn refresh_posts<T: Transport>(&mut self, api: &Api<T>) -> bool {
        if !self.is_connected() {
            return false;
        }
        match api.posts().get_feed() {
            Ok(posts) => {
                self.posts = posts;
                true
            }
            Err(_) => false,
        }
    }

    /// A wallet with no profile yet is not an error for the page.
    pub fn refresh_profile<T: Transport>(&mut self, api: &Api<T>) -> bool {
        let Some(wallet_address) = self.wallet_address.as_deref() else {
            return false;
        };
        match api.users().get_profile(wallet_address) {
            Ok(user) => {
                self.profile = Some(user);
                true
            }
            Err(e) if e.is_not_found() => {
                self.profile = None;
                true
            }
            Err(_) => false,
        }
    }

    pub fn cards(&self) -> Vec<PostCard> {
        let viewer = self.wallet_address.as_deref().unwrap_or_default();
        self.posts.iter().cloned().map(|post| PostCard::new(post, viewer)).collect()
    }

    pub fn composer(&self) -> Option<Composer> {
        self.wallet_address.clone().map(|wallet| Composer::new(Some(wallet)))
    }

    /// Shown only once a profile has been fetched.
    pub fn profile_card(&self) -> Option<ProfileCard> {
        let wallet_address = self.wallet_address.as_deref()?;
        let profile = self.profile.as_ref()?;
        Some(ProfileCard::new(wallet_address, Some(profile)))
    }
}

use tracing::warn;

use crate::api::Api;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{default_username, UpdateProfile, User};

/// Editable profile fields. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub username: String,
    pub bio: String,
    pub profile_pic_url: String,
}

impl From<&User> for ProfileDraft {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            profile_pic_url: user.profile_pic_url.clone().unwrap_or_default(),
        }
    }
}

/// The connected wallet's profile, with an edit mode.
#[derive(Debug, Clone)]
pub struct ProfileCard {
    wallet_address: String,
    profile: ProfileDraft,
    draft: Option<ProfileDraft>,
    submitting: bool,
    error: Option<String>,
}

impl ProfileCard {
    /// Without a fetched profile the card shows `default_username`.
    pub fn new(wallet_address: &str, initial: Option<&User>) -> Self {
        let profile = initial.map(ProfileDraft::from).unwrap_or_else(|| ProfileDraft {
            username: default_username(wallet_address),
            ..Default::default()
        });
        Self {
            wallet_address: wallet_address.to_string(),
            profile,
            draft: None,
            submitting: false,
            error: None,
        }
    }

    pub fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start_editing(&mut self) {
        self.draft = Some(self.profile.clone());
        self.error = None;
    }

    pub fn draft_mut(&mut self) -> Option<&mut ProfileDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_editing(&mut self) {
        self.draft = None;
        self.error = None;
    }

    /// Payload for the pending save, or `None` when not editing or a save is
    /// already in flight.
    pub fn begin_save(&mut self) -> Option<UpdateProfile> {
        if self.submitting {
            return None;
        }
        let draft = self.draft.as_ref()?;
        self.submitting = true;
        Some(UpdateProfile {
            wallet_address: self.wallet_address.clone(),
            username: Some(draft.username.clone()),
            bio: Some(draft.bio.clone()),
            profile_pic_url: Some(draft.profile_pic_url.clone()),
        })
    }

    /// On success the server's copy is shown and edit mode ends; on failure
    /// the draft stays open.
    pub fn finish_save(&mut self, result: Result<User, ApiError>) -> Option<User> {
        self.submitting = false;
        match result {
            Ok(user) => {
                self.profile = ProfileDraft::from(&user);
                self.draft = None;
                self.error = None;
                Some(user)
            }
            Err(e) => {
                warn!(error = %e, "profile update failed");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn save<T: Transport>(&mut self, api: &Api<T>) -> Option<User> {
        let input = self.begin_save()?;
        let result = api.users().update_profile(&input);
        self.finish_save(result)
    }
}

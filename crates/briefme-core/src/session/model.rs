//! Session domain model.
//!
//! Represents the authenticated end user and the credential used on their behalf.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated end user, as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Path of the profile image on the API host
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Auth provider name (e.g. "google", "slack")
    #[serde(default)]
    pub provider: Option<String>,
    /// Identifier assigned by the auth provider
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub slack_access_token: Option<String>,
    #[serde(default)]
    pub google_access_token: Option<String>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for [`User`].
///
/// Only the fields set to `Some` are written. Nullable fields cannot be reset
/// to `None` through a patch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserPatch {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub provider: Option<String>,
    pub provider_id: Option<String>,
    pub slack_access_token: Option<String>,
    pub google_access_token: Option<String>,
    pub onboarding_completed: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl User {
    /// Shallow-merges the patch into this record.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if patch.profile_image.is_some() {
            self.profile_image = patch.profile_image;
        }
        if patch.email_verified_at.is_some() {
            self.email_verified_at = patch.email_verified_at;
        }
        if patch.job_title.is_some() {
            self.job_title = patch.job_title;
        }
        if patch.department.is_some() {
            self.department = patch.department;
        }
        if patch.provider.is_some() {
            self.provider = patch.provider;
        }
        if patch.provider_id.is_some() {
            self.provider_id = patch.provider_id;
        }
        if patch.slack_access_token.is_some() {
            self.slack_access_token = patch.slack_access_token;
        }
        if patch.google_access_token.is_some() {
            self.google_access_token = patch.google_access_token;
        }
        if let Some(done) = patch.onboarding_completed {
            self.onboarding_completed = done;
        }
        if patch.created_at.is_some() {
            self.created_at = patch.created_at;
        }
        if patch.updated_at.is_some() {
            self.updated_at = patch.updated_at;
        }
    }

    /// Builds a user out of a patch alone. Unset fields take their defaults.
    pub fn from_patch(patch: UserPatch) -> Self {
        let mut user = Self::default();
        user.apply(patch);
        user
    }
}

/// Who is logged in, as held by the session store and persisted across restarts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// An authenticated session always carries both a user and a token.
    pub fn is_consistent(&self) -> bool {
        !self.is_authenticated || (self.user.is_some() && self.token.is_some())
    }

    /// Drops the authenticated flag when the invariant does not hold.
    pub fn normalized(mut self) -> Self {
        if self.is_authenticated && (self.user.is_none() || self.token.is_none()) {
            self.is_authenticated = false;
        }
        self
    }
}

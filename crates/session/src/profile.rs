//! Profile store seam: the external user-profile record and its fetch
//! contract.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fruition_auth::Role;
use fruition_core::UserId;

/// The stored user profile.
///
/// Created on first sign-in, edited by profile flows; the permission layer
/// only ever reads `role`, the rest is carried for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub uid: UserId,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Per-user feature flags, opaque at this layer.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(uid: impl Into<UserId>, role: Role, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            role,
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            institution: None,
            flags: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }
}

/// Why a profile fetch failed.
///
/// Both variants are handled identically by the context (fail-closed, no
/// permissions); they are distinguished for logging only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile not found")]
    NotFound,

    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// External profile store contract.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch(&self, uid: &UserId) -> Result<Profile, ProfileError>;
}

/// In-memory profile store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, profile: Profile) {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(profile.uid.clone(), profile);
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch(&self, uid: &UserId) -> Result<Profile, ProfileError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| ProfileError::Unavailable("store lock poisoned".to_string()))?;
        profiles.get(uid).cloned().ok_or(ProfileError::NotFound)
    }
}

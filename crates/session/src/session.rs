//! Session model: the authenticated identity as the provider reports it.

use serde::{Deserialize, Serialize};

use fruition_core::UserId;

/// An authenticated session at the identity-provider level.
///
/// Deliberately minimal: the provider owns authentication; everything about
/// the user beyond identity lives in the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: UserId,
    pub email: String,
}

impl Session {
    pub fn new(uid: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// A session-change notification: `None` on sign-out or no session.
pub type SessionChange = Option<Session>;

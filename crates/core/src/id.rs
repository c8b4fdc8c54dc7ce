//! Strongly-typed identifiers used across the composition layer.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Identity of an authenticated user.
///
/// Uids are issued by the external identity provider and are opaque at this
/// layer: no format is assumed beyond non-emptiness being the caller's
/// concern. Modeled as a string newtype rather than a UUID for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Cow<'static, str>);

impl UserId {
    pub fn new(uid: impl Into<Cow<'static, str>>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

//! Pure authorization checks and the access-explanation audit surface.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::permissions::Permission;
use crate::roles::{known_roles, permissions_for_role, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a granted permission set against a single required permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure membership check)
pub fn authorize(granted: &HashSet<Permission>, required: &Permission) -> Result<(), AuthzError> {
    if granted.contains(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
///
/// Answers "why was this allowed/denied?" for audit logs and the access
/// denied view, without exposing anything beyond the permission model.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    /// The permission that was being checked.
    pub required_permission: String,

    /// Whether access was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The role the decision was evaluated for, if known.
    pub role: Option<String>,

    /// The effective permission set, sorted for readability.
    pub effective_permissions: Vec<String>,

    /// If denied, what was missing and what would fix it.
    pub denial: Option<DenialReason>,
}

/// Detailed reason why access was denied.
#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub message: String,
    /// Known roles whose grants include the required permission.
    pub granting_roles: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Explain an access decision for a role/granted-set pair.
///
/// The granted set is passed explicitly (rather than derived here) so the
/// explanation always reflects what the caller actually enforced.
pub fn explain_access(
    role: Option<&Role>,
    granted: &HashSet<Permission>,
    required: &Permission,
) -> AccessExplanation {
    let required_str = required.as_str();

    let mut effective: Vec<String> = granted.iter().map(|p| p.as_str().to_string()).collect();
    effective.sort();

    if granted.contains(required) {
        return AccessExplanation {
            required_permission: required_str.to_string(),
            granted: true,
            reason: format!("granted permission '{required_str}' is present"),
            role: role.map(|r| r.as_str().to_string()),
            effective_permissions: effective,
            denial: None,
        };
    }

    let granting_roles: Vec<String> = known_roles()
        .iter()
        .filter(|name| permissions_for_role(&Role::new(**name)).contains(required))
        .map(|name| name.to_string())
        .collect();

    let mut suggestions = vec![format!(
        "sign in with an account whose role grants '{required_str}'"
    )];
    if !granting_roles.is_empty() {
        suggestions.insert(
            0,
            format!("roles granting this permission: {granting_roles:?}"),
        );
    }

    AccessExplanation {
        required_permission: required_str.to_string(),
        granted: false,
        reason: format!(
            "permission '{required_str}' is not in the effective set {effective:?}"
        ),
        role: role.map(|r| r.as_str().to_string()),
        effective_permissions: effective,
        denial: Some(DenialReason {
            message: format!("missing required permission: '{required_str}'"),
            granting_roles,
            suggestions,
        }),
    }
}

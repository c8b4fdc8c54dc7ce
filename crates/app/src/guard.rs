//! Declarative gates around UI subtrees.
//!
//! A guard turns the context's current state into one of a small set of
//! render outcomes. While the context is loading it makes no access decision
//! at all: deciding before the profile resolves is how unauthorized content
//! flashes, and avoiding that is the point of this layer.

use fruition_auth::{Permission, Role};
use fruition_session::AuthSnapshot;

/// What a guard requires of the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRequirement {
    /// A single permission must be granted.
    Permission(Permission),
    /// Any one of these permissions suffices.
    AnyPermission(Vec<Permission>),
    /// A feature must be accessible (active + permission intersection).
    Feature(String),
    /// The resolved role must be one of these.
    AnyRole(Vec<Role>),
}

/// Content of the built-in access-denied view.
///
/// Generic on purpose: underlying fetch errors never reach the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub title: String,
    pub message: String,
    pub offer_go_back: bool,
}

impl Default for AccessDenied {
    fn default() -> Self {
        Self {
            title: "Access Denied".to_string(),
            message: "You don't have permission to view this page.".to_string(),
            offer_go_back: true,
        }
    }
}

/// What the caller should render after an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Still loading: render neutral UI, decide nothing.
    Loading,
    /// Authorized: render the guarded subtree.
    Allow,
    /// Unauthorized with a configured redirect: navigate, render nothing.
    Redirect(String),
    /// Navigation already fired for this mount; keep rendering nothing.
    Blank,
    /// Unauthorized with a configured fallback: render it.
    Fallback,
    /// Unauthorized with nothing configured: built-in denied view.
    Denied(AccessDenied),
}

/// A mounted guard instance.
///
/// Pure branching over the snapshot; the only state is the navigation
/// latch, so the redirect side effect fires at most once per mount.
#[derive(Debug, Clone)]
pub struct Guard {
    requirement: GuardRequirement,
    redirect_to: Option<String>,
    has_fallback: bool,
    navigated: bool,
}

impl Guard {
    pub fn new(requirement: GuardRequirement) -> Self {
        Self {
            requirement,
            redirect_to: None,
            has_fallback: false,
            navigated: false,
        }
    }

    /// Navigate here instead of showing a denied view.
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    /// The caller supplies fallback content for the denied case.
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    /// Evaluate against a context snapshot.
    ///
    /// Priority on failure: redirect, then fallback, then the built-in
    /// denied view.
    pub fn evaluate(&mut self, snapshot: &AuthSnapshot) -> GuardOutcome {
        if snapshot.loading {
            return GuardOutcome::Loading;
        }

        if self.authorized(snapshot) {
            return GuardOutcome::Allow;
        }

        if let Some(target) = &self.redirect_to {
            if self.navigated {
                return GuardOutcome::Blank;
            }
            self.navigated = true;
            tracing::debug!(target = %target, "guard redirecting unauthorized user");
            return GuardOutcome::Redirect(target.clone());
        }

        if self.has_fallback {
            return GuardOutcome::Fallback;
        }

        GuardOutcome::Denied(AccessDenied::default())
    }

    fn authorized(&self, snapshot: &AuthSnapshot) -> bool {
        match &self.requirement {
            GuardRequirement::Permission(p) => snapshot.permissions.contains(p),
            GuardRequirement::AnyPermission(any) => {
                any.iter().any(|p| snapshot.permissions.contains(p))
            }
            GuardRequirement::Feature(id) => snapshot.has_feature(id),
            GuardRequirement::AnyRole(roles) => match &snapshot.role {
                Some(role) => roles.contains(role),
                None => false,
            },
        }
    }
}

//! Permission identifiers and the static permission catalog.
//!
//! Permission ids are centralized as constants so call sites never carry
//! string literals; the catalog adds display metadata for audit/UI surfaces.

use std::borrow::Cow;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "swipe_projects").
/// The catalog below is the source of truth for which ids exist; lookups
/// against unknown ids are total and fail closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Centralized permission id constants.
pub mod perm {
    /// Browse the Connect discovery feed.
    pub const SWIPE_PROJECTS: &str = "swipe_projects";
    /// Save a project for later.
    pub const SAVE_PROJECTS: &str = "save_projects";
    /// Apply to an open position on a project.
    pub const APPLY_TO_PROJECTS: &str = "apply_to_projects";
    /// Create a new research project posting.
    pub const CREATE_PROJECT: &str = "create_project";
    /// Edit a posting the user owns.
    pub const EDIT_OWN_PROJECT: &str = "edit_own_project";
    /// View applications submitted to owned postings.
    pub const VIEW_APPLICATIONS: &str = "view_applications";
    /// Accept/reject/archive applications.
    pub const MANAGE_APPLICATIONS: &str = "manage_applications";
    /// Administer user accounts.
    pub const MANAGE_USERS: &str = "manage_users";
    /// View the signup waitlist.
    pub const VIEW_WAITLIST: &str = "view_waitlist";
}

/// Display metadata for a cataloged permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDef {
    pub id: Permission,
    pub name: &'static str,
    pub description: &'static str,
}

/// The full permission catalog.
///
/// Static: defined at load time, never mutated.
pub fn permission_catalog() -> &'static [PermissionDef] {
    static CATALOG: OnceLock<Vec<PermissionDef>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let def = |id: &'static str, name: &'static str, description: &'static str| PermissionDef {
            id: Permission::new(id),
            name,
            description,
        };
        vec![
            def(
                perm::SWIPE_PROJECTS,
                "Discover projects",
                "Browse and swipe through the Connect project feed",
            ),
            def(
                perm::SAVE_PROJECTS,
                "Save projects",
                "Keep projects on a personal saved list",
            ),
            def(
                perm::APPLY_TO_PROJECTS,
                "Apply to projects",
                "Submit applications to open research positions",
            ),
            def(
                perm::CREATE_PROJECT,
                "Create projects",
                "Post new research projects with open positions",
            ),
            def(
                perm::EDIT_OWN_PROJECT,
                "Edit own projects",
                "Update postings owned by the signed-in user",
            ),
            def(
                perm::VIEW_APPLICATIONS,
                "View applications",
                "Read applications submitted to owned postings",
            ),
            def(
                perm::MANAGE_APPLICATIONS,
                "Manage applications",
                "Accept, reject and archive submitted applications",
            ),
            def(
                perm::MANAGE_USERS,
                "Manage users",
                "Administer accounts, roles and access",
            ),
            def(
                perm::VIEW_WAITLIST,
                "View waitlist",
                "Inspect pending signup waitlist entries",
            ),
        ]
    })
}

/// Look up display metadata for a permission id. Unknown ids yield `None`.
pub fn find_permission(id: &str) -> Option<&'static PermissionDef> {
    permission_catalog().iter().find(|p| p.id.as_str() == id)
}

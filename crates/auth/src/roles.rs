//! Role identifiers and the canonical role→permission table.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::permissions::{perm, Permission, permission_catalog};

/// Role identifier used for access decisions.
///
/// Roles are opaque strings at this layer; the table below maps the known
/// roles to their grants and treats everything else as granting nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role names with a defined permission set.
pub fn known_roles() -> &'static [&'static str] {
    &["student", "faculty", "admin"]
}

/// The canonical role→permission table.
///
/// - No IO
/// - No panics
/// - Total: unknown roles resolve to the empty set (fail-closed)
///
/// This is the single source of truth for grants. Students get the Connect
/// discovery grants only; authoring and review grants belong to faculty.
pub fn permissions_for_role(role: &Role) -> HashSet<Permission> {
    let ids: &[&str] = match role.as_str() {
        "student" => &[
            perm::SWIPE_PROJECTS,
            perm::SAVE_PROJECTS,
            perm::APPLY_TO_PROJECTS,
        ],
        "faculty" => &[
            perm::CREATE_PROJECT,
            perm::EDIT_OWN_PROJECT,
            perm::VIEW_APPLICATIONS,
            perm::MANAGE_APPLICATIONS,
        ],
        // Admin is granted every cataloged permission explicitly; there is
        // no wildcard at this layer.
        "admin" => {
            return permission_catalog().iter().map(|p| p.id.clone()).collect();
        }
        _ => &[],
    };

    ids.iter().map(|id| Permission::new(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn ids(set: &HashSet<Permission>) -> HashSet<&str> {
        set.iter().map(Permission::as_str).collect()
    }

    #[test]
    fn student_grants_are_exactly_the_discovery_set() {
        let set = permissions_for_role(&Role::new("student"));
        assert_eq!(
            ids(&set),
            HashSet::from([
                perm::SWIPE_PROJECTS,
                perm::SAVE_PROJECTS,
                perm::APPLY_TO_PROJECTS
            ])
        );
        assert!(!set.contains(&Permission::new(perm::CREATE_PROJECT)));
    }

    #[test]
    fn faculty_grants_cover_authoring_and_review() {
        let set = permissions_for_role(&Role::new("faculty"));
        assert!(set.contains(&Permission::new(perm::CREATE_PROJECT)));
        assert!(set.contains(&Permission::new(perm::MANAGE_APPLICATIONS)));
        assert!(!set.contains(&Permission::new(perm::SWIPE_PROJECTS)));
    }

    #[test]
    fn admin_grants_cover_the_whole_catalog() {
        let set = permissions_for_role(&Role::new("admin"));
        assert_eq!(set.len(), permission_catalog().len());
    }

    #[test]
    fn unknown_role_resolves_to_empty_set() {
        assert!(permissions_for_role(&Role::new("janitor")).is_empty());
        assert!(permissions_for_role(&Role::new("")).is_empty());
    }

    #[test]
    fn lookup_is_deterministic_across_calls() {
        let role = Role::new("faculty");
        assert_eq!(permissions_for_role(&role), permissions_for_role(&role));
    }

    proptest! {
        // Total function over arbitrary role strings: never panics, and
        // anything outside the known roles grants nothing.
        #[test]
        fn arbitrary_roles_never_panic(name in ".*") {
            let role = Role::new(name.clone());
            let set = permissions_for_role(&role);
            if !known_roles().contains(&name.as_str()) {
                prop_assert!(set.is_empty());
            }
        }
    }
}

//! Feature catalog and the feature-gating rule.
//!
//! A feature is visible to a user when it is active and the user's granted
//! permission set intersects the feature's required set. The intersection is
//! "any of", not "all of". A feature with an empty required set is denied for
//! everyone: the vacuous intersection is empty, and that policy is kept
//! explicit here rather than left to each caller.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Serialize;

use crate::permissions::{perm, Permission};

/// A gated application feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Any one of these grants visibility.
    pub required_permissions: Vec<Permission>,
    /// Inactive features are denied regardless of grants.
    pub active: bool,
}

/// The static feature catalog.
pub fn feature_catalog() -> &'static [Feature] {
    static CATALOG: OnceLock<Vec<Feature>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let requires = |ids: &[&'static str]| -> Vec<Permission> {
            ids.iter().map(|id| Permission::new(*id)).collect()
        };
        vec![
            Feature {
                id: "connect",
                name: "Connect",
                description: "Swipe-based project discovery feed",
                required_permissions: requires(&[perm::SWIPE_PROJECTS]),
                active: true,
            },
            Feature {
                id: "saved_projects",
                name: "Saved projects",
                description: "Personal list of saved project postings",
                required_permissions: requires(&[perm::SAVE_PROJECTS]),
                active: true,
            },
            Feature {
                id: "applications",
                name: "My applications",
                description: "Track submitted applications and their status",
                required_permissions: requires(&[perm::APPLY_TO_PROJECTS]),
                active: true,
            },
            Feature {
                id: "dashboard",
                name: "Dashboard",
                description: "Role-based landing dashboard",
                required_permissions: requires(&[
                    perm::CREATE_PROJECT,
                    perm::VIEW_APPLICATIONS,
                    perm::SWIPE_PROJECTS,
                ]),
                active: true,
            },
            Feature {
                id: "project_management",
                name: "Project management",
                description: "Create and edit research project postings",
                required_permissions: requires(&[perm::CREATE_PROJECT]),
                active: true,
            },
            Feature {
                id: "application_review",
                name: "Application review",
                description: "Review applicants to owned postings",
                required_permissions: requires(&[
                    perm::VIEW_APPLICATIONS,
                    perm::MANAGE_APPLICATIONS,
                ]),
                active: true,
            },
            Feature {
                id: "admin_console",
                name: "Admin console",
                description: "Account and waitlist administration",
                required_permissions: requires(&[perm::MANAGE_USERS]),
                active: true,
            },
            // Staged but not launched; stays in the catalog so the flag has
            // a defined off state instead of the feature being absent.
            Feature {
                id: "messaging",
                name: "Messaging",
                description: "Direct messages between applicants and faculty",
                required_permissions: requires(&[
                    perm::SWIPE_PROJECTS,
                    perm::CREATE_PROJECT,
                ]),
                active: false,
            },
        ]
    })
}

/// Look up a feature by id. Unknown ids yield `None`.
pub fn find_feature(id: &str) -> Option<&'static Feature> {
    feature_catalog().iter().find(|f| f.id == id)
}

/// The intersection rule: true iff any required permission is granted.
///
/// An empty required set yields false.
pub fn feature_requires_any(feature: &Feature, granted: &HashSet<Permission>) -> bool {
    feature
        .required_permissions
        .iter()
        .any(|p| granted.contains(p))
}

/// Full accessibility check for a feature id against a granted set.
///
/// Unknown feature → false. Inactive feature → false. Otherwise the
/// intersection rule decides.
pub fn has_feature(id: &str, granted: &HashSet<Permission>) -> bool {
    match find_feature(id) {
        Some(feature) => feature.active && feature_requires_any(feature, granted),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::roles::{permissions_for_role, Role};

    #[test]
    fn student_sees_connect_and_dashboard() {
        let granted = permissions_for_role(&Role::new("student"));
        assert!(has_feature("connect", &granted));
        assert!(has_feature("dashboard", &granted));
    }

    #[test]
    fn student_denied_review_only_feature() {
        let granted = permissions_for_role(&Role::new("student"));
        let review = Feature {
            id: "review",
            name: "Review",
            description: "",
            required_permissions: vec![Permission::new(perm::MANAGE_APPLICATIONS)],
            active: true,
        };
        assert!(!feature_requires_any(&review, &granted));
    }

    #[test]
    fn empty_required_set_denies_everyone() {
        let orphan = Feature {
            id: "orphan",
            name: "Orphan",
            description: "",
            required_permissions: vec![],
            active: true,
        };
        let admin = permissions_for_role(&Role::new("admin"));
        assert!(!feature_requires_any(&orphan, &admin));
    }

    #[test]
    fn inactive_feature_denied_even_for_admin() {
        let admin = permissions_for_role(&Role::new("admin"));
        let messaging = find_feature("messaging").unwrap();
        assert!(feature_requires_any(messaging, &admin));
        assert!(!has_feature("messaging", &admin));
    }

    #[test]
    fn unknown_feature_is_false_not_an_error() {
        let admin = permissions_for_role(&Role::new("admin"));
        assert!(!has_feature("time_travel", &admin));
    }

    #[test]
    fn catalog_ids_are_unique_and_cataloged_permissions_exist() {
        let catalog = feature_catalog();
        for (i, a) in catalog.iter().enumerate() {
            for b in &catalog[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate feature id {}", a.id);
            }
            for p in &a.required_permissions {
                assert!(
                    crate::permissions::find_permission(p.as_str()).is_some(),
                    "feature {} requires uncataloged permission {}",
                    a.id,
                    p
                );
            }
        }
    }
}

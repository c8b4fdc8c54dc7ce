//! `fruition-auth` — pure permission/feature policy (no IO).
//!
//! This crate is the static source of truth for roles, permissions and
//! feature gating. Everything here is a total function over defined inputs:
//! unknown roles grant nothing, unknown features are denied, and nothing in
//! this crate touches storage or the network.

pub mod authorize;
pub mod features;
pub mod permissions;
pub mod roles;

pub use authorize::{authorize, AccessExplanation, AuthzError, DenialReason, explain_access};
pub use features::{feature_catalog, feature_requires_any, find_feature, has_feature, Feature};
pub use permissions::{find_permission, perm, permission_catalog, Permission, PermissionDef};
pub use roles::{known_roles, permissions_for_role, Role};

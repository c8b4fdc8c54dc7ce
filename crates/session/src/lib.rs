//! `fruition-session` — the auth/permission context.
//!
//! Bridges the external identity provider's session-change notifications
//! into the permission model: resolves the signed-in user's profile, derives
//! the permission set from the profile's role, and exposes a single
//! consistent read surface (`AuthContext`) for guards and dashboards.
//!
//! The provider and profile store are injected seams; in-memory
//! implementations of both ship here for tests and development.

pub mod context;
pub mod profile;
pub mod provider;
pub mod session;

pub use context::{AuthContext, AuthSnapshot};
pub use profile::{InMemoryProfileStore, Profile, ProfileError, ProfileStore};
pub use provider::{InMemorySessionProvider, SessionEvents, SessionProvider};
pub use session::{Session, SessionChange};

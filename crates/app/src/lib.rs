//! `fruition-app` — composition root for the Fruition dashboard core.
//!
//! Wires the injected seams together: the auth context reads the session
//! provider and profile store, the initializer bootstraps the dashboard
//! registry for the resolved role, guards gate subtrees on the context's
//! snapshots, and the shell resolves per-region render plans.

pub mod guard;
pub mod init;
pub mod shell;

pub use guard::{AccessDenied, Guard, GuardOutcome, GuardRequirement};
pub use init::DashboardInitializer;
pub use shell::{DashboardShell, RegionView};

/// Initialize process-wide observability for hosts without their own setup.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_observability() {
    fruition_observability::init();
}

//! Dashboard initializer: wires auth readiness into the registry bootstrap.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use fruition_dashboard::{initialize_for_role, DashboardRegistry, LayoutId};
use fruition_session::AuthContext;

/// One-shot wiring between the auth context and the dashboard registry.
///
/// Waits for the context's readiness signal, then bootstraps the registry
/// for the resolved role. Running it again is harmless: the bootstrap skips
/// populated registries.
pub struct DashboardInitializer {
    context: AuthContext,
    registry: Arc<DashboardRegistry>,
    explicit_layout: Option<LayoutId>,
}

impl DashboardInitializer {
    pub fn new(context: AuthContext, registry: Arc<DashboardRegistry>) -> Self {
        Self {
            context,
            registry,
            explicit_layout: None,
        }
    }

    /// Pin the current layout instead of deriving it from the role.
    pub fn with_layout(mut self, layout: LayoutId) -> Self {
        self.explicit_layout = Some(layout);
        self
    }

    /// Wait for auth readiness, then bootstrap for the resolved role.
    ///
    /// A ready context with no role (signed out, or profile fetch failed)
    /// leaves the registry in its default state.
    pub async fn run(&self) {
        self.context.wait_ready().await;

        match self.context.role() {
            Some(role) => {
                initialize_for_role(&self.registry, &role, self.explicit_layout.clone());
            }
            None => {
                tracing::info!("no resolved role, dashboard left at defaults");
            }
        }
    }

    /// `run`, bounded: composition roots that cannot wait forever use this.
    pub async fn run_with_timeout(&self, timeout: Duration) -> anyhow::Result<()> {
        tokio::time::timeout(timeout, self.run())
            .await
            .context("auth context did not become ready in time")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fruition_auth::Role;
    use fruition_session::{InMemoryProfileStore, InMemorySessionProvider, Profile, Session};

    #[tokio::test]
    async fn initializes_for_resolved_role() {
        let provider = InMemorySessionProvider::new();
        provider.sign_in(Session::new("prof", "prof@uni.edu"));

        let store = InMemoryProfileStore::new();
        store.insert(Profile::new("prof", Role::new("faculty"), "prof@uni.edu"));

        let context = AuthContext::new(Arc::new(store));
        let _driver = context.attach(&provider);

        let registry = Arc::new(DashboardRegistry::new());
        let init = DashboardInitializer::new(context, registry.clone());
        init.run_with_timeout(Duration::from_secs(5)).await.unwrap();

        assert_eq!(registry.current_layout_id().as_str(), "faculty-layout");
        assert!(registry.has_widgets());
    }

    #[tokio::test]
    async fn signed_out_context_leaves_registry_at_defaults() {
        let provider = InMemorySessionProvider::new();
        let context = AuthContext::new(Arc::new(InMemoryProfileStore::new()));
        let _driver = context.attach(&provider);

        let registry = Arc::new(DashboardRegistry::new());
        let init = DashboardInitializer::new(context, registry.clone());
        init.run_with_timeout(Duration::from_secs(5)).await.unwrap();

        assert!(!registry.has_widgets());
        assert_eq!(registry.current_layout_id().as_str(), "default");
    }
}

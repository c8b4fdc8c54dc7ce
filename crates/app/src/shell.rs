//! Dashboard shell: resolves what renders in each shell region.

use std::sync::Arc;

use fruition_dashboard::{region, DashboardRegistry, RegionId, Widget};
use fruition_session::AuthSnapshot;

/// Widgets resolved for one shell region, in declared order.
#[derive(Debug, Clone)]
pub struct RegionView {
    pub region: RegionId,
    pub widgets: Vec<Widget>,
}

/// The dashboard shell's view over the registry.
///
/// The shell renders a fixed set of regions; the current layout decides what
/// lands in them. Role-restricted widgets are filtered against the snapshot
/// here, after resolution, so the registry itself stays role-agnostic.
#[derive(Clone)]
pub struct DashboardShell {
    registry: Arc<DashboardRegistry>,
}

impl DashboardShell {
    pub fn new(registry: Arc<DashboardRegistry>) -> Self {
        Self { registry }
    }

    /// Region ids the shell always renders.
    pub fn shell_regions() -> [RegionId; 2] {
        [RegionId::new(region::MAIN), RegionId::new(region::SIDEBAR)]
    }

    /// Resolve every shell region for the given auth state.
    pub fn render_plan(&self, snapshot: &AuthSnapshot) -> Vec<RegionView> {
        Self::shell_regions()
            .into_iter()
            .map(|region| {
                let widgets = self
                    .registry
                    .widgets_by_region(&region)
                    .into_iter()
                    .filter(|widget| match &snapshot.role {
                        Some(role) => widget.visible_to(role),
                        // No resolved role: only unrestricted widgets show.
                        None => widget.roles.is_none(),
                    })
                    .collect();
                RegionView { region, widgets }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use fruition_auth::{permissions_for_role, Role};
    use fruition_dashboard::initialize_for_role;

    fn snapshot_for(role: &str) -> AuthSnapshot {
        let role = Role::new(role.to_string());
        AuthSnapshot {
            loading: false,
            session: None,
            permissions: permissions_for_role(&role),
            role: Some(role),
        }
    }

    #[test]
    fn render_plan_covers_all_shell_regions() {
        let registry = Arc::new(DashboardRegistry::new());
        initialize_for_role(&registry, &Role::new("student"), None);
        let shell = DashboardShell::new(registry);

        let plan = shell.render_plan(&snapshot_for("student"));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].region.as_str(), region::MAIN);
        assert_eq!(plan[1].region.as_str(), region::SIDEBAR);
        assert!(!plan[0].widgets.is_empty());
        assert!(!plan[1].widgets.is_empty());
    }

    #[test]
    fn role_restricted_widgets_hidden_without_role() {
        let registry = Arc::new(DashboardRegistry::new());
        initialize_for_role(&registry, &Role::new("student"), None);
        let shell = DashboardShell::new(registry);

        let anonymous = AuthSnapshot {
            loading: false,
            session: None,
            role: None,
            permissions: HashSet::new(),
        };
        let plan = shell.render_plan(&anonymous);
        assert!(plan.iter().all(|view| view.widgets.is_empty()));
    }
}

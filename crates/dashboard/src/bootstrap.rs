//! Role-based registry bootstrap: the built-in widget/layout catalogs.
//!
//! Populates a fresh registry with the widgets and layout for a role, then
//! points the registry at that layout. Runs once per session: a registry
//! that already has widgets is left untouched.

use serde_json::json;

use fruition_auth::Role;

use crate::layout::{region, Layout, LayoutId, Region};
use crate::registry::DashboardRegistry;
use crate::widget::{SizeClass, Widget, WidgetId};

/// Populate widgets and layouts for a role.
///
/// Idempotent at the session level: if the catalog is already non-empty the
/// whole call is skipped, so repeated initialization (double-mounted shells,
/// repeated auth notifications) cannot re-register anything or move the
/// current-layout pointer away from what the first call produced.
///
/// When `explicit_layout` is supplied it becomes the current layout;
/// otherwise the layout id is derived from the role as `"<role>-layout"`,
/// with no further fallback chain.
pub fn initialize_for_role(
    registry: &DashboardRegistry,
    role: &Role,
    explicit_layout: Option<LayoutId>,
) {
    if registry.has_widgets() {
        tracing::debug!(role = %role, "dashboard already initialized, skipping bootstrap");
        return;
    }

    for widget in default_widgets_for(role) {
        registry.register_widget(widget);
    }
    if let Some(layout) = default_layout_for(role) {
        registry.register_layout(layout);
    }

    let target = explicit_layout.unwrap_or_else(|| derived_layout_id(role));
    tracing::info!(role = %role, layout = %target, "dashboard initialized");
    registry.set_current_layout(target);
}

/// The layout id a role resolves to when none is supplied explicitly.
pub fn derived_layout_id(role: &Role) -> LayoutId {
    LayoutId::new(format!("{}-layout", role.as_str()))
}

/// Built-in widgets for a role. Unknown roles have no built-ins.
pub fn default_widgets_for(role: &Role) -> Vec<Widget> {
    match role.as_str() {
        "student" => vec![
            Widget::new("active-projects", "ActiveProjectsList", "Active projects")
                .with_description("Projects the student is currently part of")
                .with_size(SizeClass::Large)
                .with_roles(vec![role.clone()]),
            Widget::new("recommended-projects", "ConnectFeedPreview", "Recommended for you")
                .with_description("Preview of the Connect discovery feed")
                .with_config(json!({ "max_items": 5 }))
                .with_roles(vec![role.clone()]),
            Widget::new("application-status", "ApplicationStatusList", "My applications")
                .with_config(json!({ "show_archived": false }))
                .with_roles(vec![role.clone()]),
            Widget::new("saved-projects", "SavedProjectsList", "Saved projects")
                .with_size(SizeClass::Small)
                .with_roles(vec![role.clone()]),
            Widget::new("profile-completion", "ProfileCompletionMeter", "Profile completion")
                .with_size(SizeClass::Small)
                .with_roles(vec![role.clone()]),
        ],
        "faculty" => vec![
            Widget::new("project-postings", "ProjectPostingsList", "My postings")
                .with_description("Research projects posted by the signed-in user")
                .with_size(SizeClass::Large)
                .with_roles(vec![role.clone()]),
            Widget::new("applicant-review", "ApplicantReviewQueue", "Applicant review")
                .with_config(json!({ "page_size": 10 }))
                .with_roles(vec![role.clone()]),
            Widget::new("open-positions", "OpenPositionsList", "Open positions")
                .with_size(SizeClass::Small)
                .with_roles(vec![role.clone()]),
            Widget::new("posting-engagement", "PostingEngagementSummary", "Engagement")
                .with_description("Swipes and saves across active postings")
                .with_size(SizeClass::Small)
                .with_roles(vec![role.clone()]),
        ],
        "admin" => vec![
            Widget::new("user-management", "UserManagementTable", "Users")
                .with_size(SizeClass::Full)
                .with_roles(vec![role.clone()]),
            Widget::new("waitlist-overview", "WaitlistOverview", "Waitlist")
                .with_roles(vec![role.clone()]),
            Widget::new("platform-activity", "PlatformActivityFeed", "Activity")
                .with_size(SizeClass::Small)
                .with_roles(vec![role.clone()]),
        ],
        _ => vec![],
    }
}

/// Built-in layout for a role. Unknown roles have none.
pub fn default_layout_for(role: &Role) -> Option<Layout> {
    let ids = |names: &[&str]| -> Vec<WidgetId> {
        names.iter().map(|n| WidgetId::new(*n)).collect()
    };

    let layout = match role.as_str() {
        "student" => Layout::new(
            "student-layout",
            "Student dashboard",
            vec![
                Region::new(
                    region::MAIN,
                    ids(&["active-projects", "recommended-projects", "application-status"]),
                ),
                Region::new(region::SIDEBAR, ids(&["saved-projects", "profile-completion"])),
            ],
        ),
        "faculty" => Layout::new(
            "faculty-layout",
            "Faculty dashboard",
            vec![
                Region::new(region::MAIN, ids(&["project-postings", "applicant-review"])),
                Region::new(region::SIDEBAR, ids(&["open-positions", "posting-engagement"])),
            ],
        ),
        "admin" => Layout::new(
            "admin-layout",
            "Admin dashboard",
            vec![
                Region::new(region::MAIN, ids(&["user-management", "waitlist-overview"])),
                Region::new(region::SIDEBAR, ids(&["platform-activity"])),
            ],
        ),
        _ => return None,
    };

    Some(layout)
}

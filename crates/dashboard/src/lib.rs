//! `fruition-dashboard` — in-memory dashboard composition registry.
//!
//! Widgets (renderable units with metadata) and layouts (named arrangements
//! of widgets into regions) are registered once per session into a
//! process-local catalog; resolution answers "what renders in region X of
//! the current layout" and degrades to empty instead of failing.

pub mod bootstrap;
pub mod layout;
pub mod registry;
pub mod widget;

pub use bootstrap::{default_layout_for, default_widgets_for, derived_layout_id, initialize_for_role};
pub use layout::{region, Layout, LayoutId, Region, RegionId};
pub use registry::DashboardRegistry;
pub use widget::{ComponentRef, SizeClass, Widget, WidgetId};

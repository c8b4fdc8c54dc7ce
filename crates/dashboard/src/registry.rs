//! In-memory widget/layout registry with a current-layout pointer.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::layout::{Layout, LayoutId, RegionId};
use crate::widget::{Widget, WidgetId};

/// Process-local catalog of widgets and layouts.
///
/// State grows monotonically within a session: registrations are
/// insert-if-absent, nothing is ever unregistered, and there is no reset
/// short of dropping the registry. Rebuilt on every session/page lifecycle,
/// never persisted.
#[derive(Debug)]
pub struct DashboardRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    widgets: HashMap<WidgetId, Widget>,
    layouts: HashMap<LayoutId, Layout>,
    current_layout: LayoutId,
}

impl DashboardRegistry {
    /// A fresh registry: zero widgets, the built-in `default` layout, and
    /// the pointer aimed at it.
    pub fn new() -> Self {
        let default = Layout::built_in_default();
        let current_layout = default.id.clone();
        let mut layouts = HashMap::new();
        layouts.insert(default.id.clone(), default);

        Self {
            inner: RwLock::new(Inner {
                widgets: HashMap::new(),
                layouts,
                current_layout,
            }),
        }
    }

    /// Register a widget. Duplicate ids are a no-op: the first registration
    /// wins and the call is not an error.
    pub fn register_widget(&self, widget: Widget) {
        // A poisoned lock leaves the registry frozen at its last good state;
        // registration becomes a no-op, matching the total-function contract.
        if let Ok(mut inner) = self.inner.write() {
            if inner.widgets.contains_key(&widget.id) {
                tracing::debug!(widget = %widget.id, "duplicate widget registration ignored");
                return;
            }
            inner.widgets.insert(widget.id.clone(), widget);
        }
    }

    /// Register a layout. Same idempotent-insert semantics as widgets.
    pub fn register_layout(&self, layout: Layout) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.layouts.contains_key(&layout.id) {
                tracing::debug!(layout = %layout.id, "duplicate layout registration ignored");
                return;
            }
            inner.layouts.insert(layout.id.clone(), layout);
        }
    }

    /// Point the registry at a layout, registered or not.
    ///
    /// The pointer may legitimately be set before the layout it names
    /// finishes registering in the same tick; resolution degrades to empty
    /// until registration lands, so the setter never validates.
    pub fn set_current_layout(&self, layout_id: LayoutId) {
        if let Ok(mut inner) = self.inner.write() {
            inner.current_layout = layout_id;
        }
    }

    pub fn current_layout_id(&self) -> LayoutId {
        match self.inner.read() {
            Ok(inner) => inner.current_layout.clone(),
            Err(_) => LayoutId::new("default"),
        }
    }

    /// The layout the pointer names, if registered.
    pub fn current_layout(&self) -> Option<Layout> {
        let inner = self.inner.read().ok()?;
        inner.layouts.get(&inner.current_layout).cloned()
    }

    pub fn widget(&self, id: &WidgetId) -> Option<Widget> {
        self.inner.read().ok()?.widgets.get(id).cloned()
    }

    pub fn layout(&self, id: &LayoutId) -> Option<Layout> {
        self.inner.read().ok()?.layouts.get(id).cloned()
    }

    pub fn widget_count(&self) -> usize {
        self.inner.read().map(|inner| inner.widgets.len()).unwrap_or(0)
    }

    pub fn layout_count(&self) -> usize {
        self.inner.read().map(|inner| inner.layouts.len()).unwrap_or(0)
    }

    /// True once any widget has been registered. The built-in `default`
    /// layout does not count: it exists from construction.
    pub fn has_widgets(&self) -> bool {
        self.widget_count() > 0
    }

    /// Resolve the widgets rendering in a region of the current layout.
    ///
    /// Degrades to empty rather than failing: an unregistered current
    /// layout, an unknown region, and unresolved widget ids all just drop
    /// out. Declared widget order is preserved for the ids that resolve.
    pub fn widgets_by_region(&self, region_id: &RegionId) -> Vec<Widget> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };

        let Some(layout) = inner.layouts.get(&inner.current_layout) else {
            return Vec::new();
        };

        let Some(region) = layout.region(region_id) else {
            return Vec::new();
        };

        region
            .widget_ids
            .iter()
            .filter_map(|id| {
                let widget = inner.widgets.get(id).cloned();
                if widget.is_none() {
                    tracing::warn!(
                        widget = %id,
                        region = %region_id,
                        layout = %layout.id,
                        "region references unregistered widget"
                    );
                }
                widget
            })
            .collect()
    }
}

impl Default for DashboardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

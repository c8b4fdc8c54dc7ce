//! Layout model: named arrangements of widgets into regions.

use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// Identifier of a region within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RegionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a registered layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(String);

impl LayoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LayoutId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Region ids the dashboard shell always renders.
pub mod region {
    pub const MAIN: &str = "main";
    pub const SIDEBAR: &str = "sidebar";
}

/// A named slot in a layout with an ordered widget assignment.
///
/// Widget ids may reference widgets that are not (yet) registered;
/// resolution filters those out rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub widget_ids: Vec<WidgetId>,
}

impl Region {
    pub fn new(id: impl Into<String>, widget_ids: Vec<WidgetId>) -> Self {
        Self {
            id: RegionId::new(id),
            title: None,
            widget_ids,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A named arrangement of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    pub regions: Vec<Region>,
}

impl Layout {
    pub fn new(id: impl Into<String>, name: impl Into<String>, regions: Vec<Region>) -> Self {
        Self {
            id: LayoutId::new(id),
            name: name.into(),
            regions,
        }
    }

    /// Look up a region by id within this layout.
    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| &r.id == id)
    }

    /// The built-in layout present in every registry from construction.
    ///
    /// Carries the shell regions with empty widget assignments so the
    /// current-layout pointer is never dangling.
    pub fn built_in_default() -> Self {
        Self::new(
            "default",
            "Default",
            vec![
                Region::new(region::MAIN, vec![]),
                Region::new(region::SIDEBAR, vec![]),
            ],
        )
    }
}

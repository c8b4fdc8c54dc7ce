//! Widget model: renderable units with metadata.

use serde::{Deserialize, Serialize};

use fruition_auth::Role;

/// Unique identifier of a registered widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque reference to a renderable component.
///
/// The registry stores the reference and hands it back on resolution; what
/// it points at is entirely the render layer's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(component: impl Into<String>) -> Self {
        Self(component.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rendered footprint of a widget inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
    /// Spans the full region width.
    Full,
}

/// A registered widget: component reference plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub component: ComponentRef,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub size: SizeClass,
    /// Default configuration, opaque to the registry.
    #[serde(default)]
    pub config: serde_json::Value,
    /// When present, only these roles should see the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl Widget {
    pub fn new(id: impl Into<String>, component: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: WidgetId::new(id),
            component: ComponentRef::new(component),
            title: title.into(),
            description: None,
            size: SizeClass::default(),
            config: serde_json::Value::Object(serde_json::Map::new()),
            roles: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Visibility test against the role list. No list means visible to all.
    pub fn visible_to(&self, role: &Role) -> bool {
        match &self.roles {
            Some(roles) => roles.contains(role),
            None => true,
        }
    }
}

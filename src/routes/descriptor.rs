//! Route declarations as they appear in the route data file.

use serde::{Deserialize, Serialize};

/// Flags attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Navigation requires a signed-in user.
    #[serde(default)]
    pub requires_auth: bool,
    /// Document title shown by the front end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One declared route, optionally with nested child routes.
///
/// Child paths are relative to their parent unless they start with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub component: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    #[must_use]
    pub fn new(path: &str, name: &str, component: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            component: component.to_string(),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    #[must_use]
    pub fn titled(mut self, title: &str) -> Self {
        self.meta.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }
}

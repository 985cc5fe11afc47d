//! Element handles and locator strategies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Class name of Android editable text fields.
pub const EDIT_TEXT_CLASS: &str = "android.widget.EditText";

/// Class name of Android static text views.
pub const TEXT_VIEW_CLASS: &str = "android.widget.TextView";

/// Opaque identifier of a located UI element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Wrap a driver-issued element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the driver-issued id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Method used to resolve UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// Fully qualified widget class
    ClassName,
    /// Resource id
    Id,
    /// Content description
    AccessibilityId,
    /// XPath over the view hierarchy
    XPath,
}

impl LocatorStrategy {
    /// Protocol name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorStrategy::ClassName => "class name",
            LocatorStrategy::Id => "id",
            LocatorStrategy::AccessibilityId => "accessibility id",
            LocatorStrategy::XPath => "xpath",
        }
    }
}

impl std::fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_names() {
        assert_eq!(LocatorStrategy::ClassName.as_str(), "class name");
        assert_eq!(LocatorStrategy::AccessibilityId.to_string(), "accessibility id");
    }

    #[test]
    fn test_element_handle_display() {
        let el = ElementHandle::new("el-7");
        assert_eq!(el.to_string(), "el-7");
        assert_eq!(el.as_str(), "el-7");
    }
}

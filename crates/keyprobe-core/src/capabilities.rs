//! Session capabilities: named options merged over a base default set.
//!
//! The recognized options and their effects belong to the driver; this type
//! only stores and merges them.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Package of the API demos application the keyboard suite drives.
pub const API_DEMOS_PACKAGE: &str = "io.appium.android.apis";

/// Activity hosting the editable text fields.
pub const TEXT_FIELDS_ACTIVITY: &str = ".view.TextFields";

/// Activity that echoes received key events.
pub const KEY_EVENT_ACTIVITY: &str = ".text.KeyEventText";

/// Named session options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Capabilities(BTreeMap<String, Value>);

impl Capabilities {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base defaults every session starts from.
    pub fn base() -> Self {
        Self::new()
            .with("platformName", "Android")
            .with("deviceName", "Android")
            .with("automationName", "UiAutomator2")
    }

    /// Capabilities for the ascii keyboard group.
    pub fn ascii_keyboard() -> Self {
        Self::base().merge(
            Self::new()
                .with("newCommandTimeout", 90)
                .with("appPackage", API_DEMOS_PACKAGE)
                .with("appActivity", TEXT_FIELDS_ACTIVITY),
        )
    }

    /// Capabilities for the unicode keyboard group.
    pub fn unicode_keyboard() -> Self {
        Self::ascii_keyboard().merge(
            Self::new()
                .with("unicodeKeyboard", true)
                .with("resetKeyboard", true),
        )
    }

    /// Set an option, returning the updated set.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Merge `overrides` over this set. Overrides win on conflicting names.
    pub fn merge(mut self, overrides: Capabilities) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Get an option value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Get an option as a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an option as a boolean flag. Missing options are `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

//! The automation driver contract.
//!
//! Everything behind this trait (session protocol, element resolution, input
//! encoding, IME switching) belongs to the driver implementation.

use keyprobe_core::{
    Capabilities, ElementHandle, KeyCode, LocatorStrategy, MetaState, Result, SessionHandle,
};

/// Remote UI automation operations against one device.
///
/// Use `AutomationDriver` for the `Send` variant.
#[trait_variant::make(AutomationDriver: Send)]
pub trait LocalAutomationDriver {
    /// Create a session with the given capabilities.
    async fn create_session(&self, capabilities: Capabilities) -> Result<SessionHandle>;

    /// Delete the active session.
    async fn delete_session(&self) -> Result<()>;

    /// Find all elements matching a locator, in document order.
    async fn find_elements(
        &self,
        strategy: LocatorStrategy,
        value: &str,
    ) -> Result<Vec<ElementHandle>>;

    /// Find the first element matching a locator.
    async fn find_element(&self, strategy: LocatorStrategy, value: &str) -> Result<ElementHandle>;

    /// Read an element's text.
    async fn get_text(&self, element: &ElementHandle) -> Result<String>;

    /// Clear an editable element.
    async fn clear(&self, element: &ElementHandle) -> Result<()>;

    /// Replace an element's value.
    async fn set_value(&self, text: &str, element: &ElementHandle) -> Result<()>;

    /// Type a keystroke sequence into the focused element.
    async fn keys(&self, keys: &[String]) -> Result<()>;

    /// Press a hardware key with optional modifiers.
    async fn press_key_code(&self, code: KeyCode, meta: Option<MetaState>) -> Result<()>;

    /// List installed input method engines.
    async fn available_ime_engines(&self) -> Result<Vec<String>>;

    /// Make an input method engine the active one.
    async fn activate_ime_engine(&self, engine: &str) -> Result<()>;

    /// Whether the device screen is locked.
    async fn is_locked(&self) -> Result<bool>;

    /// Attempt to unlock the device.
    async fn unlock(&self) -> Result<()>;

    /// Start an activity of an installed package.
    async fn start_activity(&self, package: &str, activity: &str) -> Result<()>;

    /// Tap an element.
    async fn click(&self, element: &ElementHandle) -> Result<()>;
}

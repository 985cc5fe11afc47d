//! In-memory automation driver modelling the API demos application.
//!
//! The simulated device reproduces the platform quirks the verification
//! helpers exist to absorb: a lock screen that needs several unlock calls,
//! editable fields that append `". Editing."` to their text, a key event that
//! gets lost, and an ASCII keyboard that cannot type other scripts.

mod activity;
mod events;

pub use activity::Activity;
pub use events::{render_key_event, KeyAction};

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use keyprobe_core::config::UNICODE_IME;
use keyprobe_core::{
    Capabilities, ElementHandle, Error, KeyCode, LocatorStrategy, MetaState, Result,
    SessionHandle, SimulatorSettings,
};

use crate::driver::AutomationDriver;
use activity::{FieldKind, SimElement};

/// Suffix some platforms append to the accessibility text of editable fields.
const EDITING_ANNOTATION: &str = ". Editing.";

const PASSWORD_MASK: char = '•';

/// Mutable device state.
#[derive(Debug)]
struct DeviceState {
    session: Option<SessionHandle>,
    ime_to_restore: Option<String>,
    unlock_remaining: u32,
    unlock_calls: u32,
    active_ime: String,
    activity: Option<Activity>,
    elements: Vec<SimElement>,
    focused: Option<ElementHandle>,
    next_element_id: u64,
    clock: u64,
    events_seen: u64,
}

/// Simulated Android device implementing `AutomationDriver`.
#[derive(Debug)]
pub struct SimulatedDevice {
    settings: SimulatorSettings,
    state: Mutex<DeviceState>,
}

impl SimulatedDevice {
    /// Create a device with default settings.
    pub fn new() -> Self {
        Self::with_settings(SimulatorSettings::default())
    }

    /// Create a device with custom settings.
    pub fn with_settings(settings: SimulatorSettings) -> Self {
        let active_ime = settings.ime_engines.first().cloned().unwrap_or_default();
        let state = DeviceState {
            session: None,
            ime_to_restore: None,
            unlock_remaining: settings.unlock_calls_required,
            unlock_calls: 0,
            active_ime,
            activity: None,
            elements: Vec::new(),
            focused: None,
            next_element_id: 0,
            clock: 0,
            events_seen: 0,
        };
        Self {
            settings,
            state: Mutex::new(state),
        }
    }

    /// Whether a session is active.
    pub fn has_session(&self) -> bool {
        self.lock().map(|s| s.session.is_some()).unwrap_or(false)
    }

    /// Currently active input method engine.
    pub fn active_ime(&self) -> String {
        self.lock().map(|s| s.active_ime.clone()).unwrap_or_default()
    }

    /// Number of unlock calls received so far.
    pub fn unlock_calls(&self) -> u32 {
        self.lock().map(|s| s.unlock_calls).unwrap_or(0)
    }

    /// Currently displayed activity.
    pub fn current_activity(&self) -> Option<Activity> {
        self.lock().ok().and_then(|s| s.activity)
    }

    fn lock(&self) -> Result<MutexGuard<'_, DeviceState>> {
        self.state
            .lock()
            .map_err(|_| Error::Driver("device state poisoned".to_string()))
    }

    /// Lock state and require an active session.
    fn session_state(&self) -> Result<MutexGuard<'_, DeviceState>> {
        let state = self.lock()?;
        if state.session.is_none() {
            return Err(Error::NoActiveSession);
        }
        Ok(state)
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    fn element_mut(&mut self, handle: &ElementHandle) -> Result<&mut SimElement> {
        self.elements
            .iter_mut()
            .find(|el| &el.handle == handle)
            .ok_or_else(|| Error::Driver(format!("stale element reference: {handle}")))
    }

    fn editable_mut(&mut self, handle: &ElementHandle) -> Result<&mut SimElement> {
        let element = self.element_mut(handle)?;
        if !element.is_editable() {
            return Err(Error::Driver(format!("element is not editable: {handle}")));
        }
        Ok(element)
    }

    fn show(&mut self, activity: Activity) {
        self.elements = activity.layout(&mut self.next_element_id);
        self.activity = Some(activity);
        self.focused = None;
    }

    fn accepts(&self, c: char) -> bool {
        c.is_ascii() || self.active_ime == UNICODE_IME
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl AutomationDriver for SimulatedDevice {
    async fn create_session(&self, capabilities: Capabilities) -> Result<SessionHandle> {
        let mut state = self.lock()?;
        if state.session.is_some() {
            return Err(Error::Driver("a session is already active".to_string()));
        }

        if capabilities.flag("unicodeKeyboard") {
            if !self.settings.ime_engines.iter().any(|e| e == UNICODE_IME) {
                return Err(Error::Driver(format!("{UNICODE_IME} is not installed")));
            }
            if capabilities.flag("resetKeyboard") {
                state.ime_to_restore = Some(state.active_ime.clone());
            }
            state.active_ime = UNICODE_IME.to_string();
        }

        if let (Some(package), Some(name)) = (
            capabilities.get_str("appPackage"),
            capabilities.get_str("appActivity"),
        ) {
            let activity = Activity::resolve(package, name).ok_or_else(|| {
                Error::Driver(format!("activity {package}/{name} does not exist"))
            })?;
            state.show(activity);
        }

        let session = SessionHandle::new(capabilities);
        info!(
            "Simulated session created: id={}, ime={}",
            session.id, state.active_ime
        );
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn delete_session(&self) -> Result<()> {
        let mut state = self.session_state()?;
        if let Some(ime) = state.ime_to_restore.take() {
            debug!("Restoring keyboard: {}", ime);
            state.active_ime = ime;
        }
        if let Some(session) = state.session.take() {
            info!("Simulated session deleted: id={}", session.id);
        }
        state.activity = None;
        state.elements.clear();
        state.focused = None;
        Ok(())
    }

    async fn find_elements(
        &self,
        strategy: LocatorStrategy,
        value: &str,
    ) -> Result<Vec<ElementHandle>> {
        let state = self.session_state()?;
        if strategy == LocatorStrategy::XPath {
            return Err(Error::Driver("xpath locators are not supported".to_string()));
        }
        Ok(state
            .elements
            .iter()
            .filter(|el| match strategy {
                LocatorStrategy::ClassName => el.class_name == value,
                LocatorStrategy::AccessibilityId => el.content_desc == Some(value),
                LocatorStrategy::Id | LocatorStrategy::XPath => el.resource_id == value,
            })
            .map(|el| el.handle.clone())
            .collect())
    }

    async fn find_element(&self, strategy: LocatorStrategy, value: &str) -> Result<ElementHandle> {
        self.find_elements(strategy, value)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ElementNotFound(format!("{strategy}={value}")))
    }

    async fn get_text(&self, element: &ElementHandle) -> Result<String> {
        let mut state = self.session_state()?;
        let element = state.element_mut(element)?;
        let text = match element.kind {
            FieldKind::Password => element.text.chars().map(|_| PASSWORD_MASK).collect(),
            FieldKind::Editable if self.settings.editing_annotation => {
                format!("{}{}", element.text, EDITING_ANNOTATION)
            }
            _ => element.text.clone(),
        };
        Ok(text)
    }

    async fn clear(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.session_state()?;
        state.editable_mut(element)?.text.clear();
        state.focused = Some(element.clone());
        Ok(())
    }

    async fn set_value(&self, text: &str, element: &ElementHandle) -> Result<()> {
        let mut state = self.session_state()?;
        state.editable_mut(element)?.text = text.to_string();
        state.focused = Some(element.clone());
        Ok(())
    }

    async fn keys(&self, keys: &[String]) -> Result<()> {
        let mut state = self.session_state()?;
        let focused = state
            .focused
            .clone()
            .ok_or_else(|| Error::Driver("no focused element".to_string()))?;

        let typed: String = keys
            .iter()
            .flat_map(|k| k.chars())
            .filter(|c| state.accepts(*c))
            .collect();
        let requested: usize = keys.iter().map(|k| k.chars().count()).sum();
        if typed.chars().count() != requested {
            warn!(
                "Keyboard {} dropped {} character(s)",
                state.active_ime,
                requested - typed.chars().count()
            );
        }

        state.editable_mut(&focused)?.text.push_str(&typed);
        Ok(())
    }

    async fn press_key_code(&self, code: KeyCode, meta: Option<MetaState>) -> Result<()> {
        let mut state = self.session_state()?;
        state.events_seen += 1;
        if self.settings.drop_first_key_event && state.events_seen == 1 {
            debug!("Dropping key event: {}", code);
            return Ok(());
        }
        if state.activity != Some(Activity::KeyEventText) {
            debug!("Key event without listener: {}", code);
            return Ok(());
        }

        let meta = meta.unwrap_or_default();
        let down = state.tick();
        let up = state.tick();
        let lines = [
            render_key_event(code, meta, KeyAction::Down, down),
            render_key_event(code, meta, KeyAction::Up, up),
        ];

        let log = state
            .elements
            .iter_mut()
            .rev()
            .find(|el| el.kind == FieldKind::Log)
            .ok_or_else(|| Error::Driver("key event log missing".to_string()))?;
        for line in lines {
            if !log.text.is_empty() {
                log.text.push('\n');
            }
            log.text.push_str(&line);
        }
        Ok(())
    }

    async fn available_ime_engines(&self) -> Result<Vec<String>> {
        let _state = self.session_state()?;
        Ok(self.settings.ime_engines.clone())
    }

    async fn activate_ime_engine(&self, engine: &str) -> Result<()> {
        let mut state = self.session_state()?;
        if !self.settings.ime_engines.iter().any(|e| e == engine) {
            return Err(Error::Driver(format!("IME engine not available: {engine}")));
        }
        info!("Activating IME engine: {}", engine);
        state.active_ime = engine.to_string();
        Ok(())
    }

    async fn is_locked(&self) -> Result<bool> {
        Ok(self.session_state()?.unlock_remaining > 0)
    }

    async fn unlock(&self) -> Result<()> {
        let mut state = self.session_state()?;
        state.unlock_calls += 1;
        state.unlock_remaining = state.unlock_remaining.saturating_sub(1);
        debug!("Unlock requested: remaining={}", state.unlock_remaining);
        Ok(())
    }

    async fn start_activity(&self, package: &str, activity: &str) -> Result<()> {
        let mut state = self.session_state()?;
        let resolved = Activity::resolve(package, activity).ok_or_else(|| {
            Error::Driver(format!("activity {package}/{activity} does not exist"))
        })?;
        debug!("Starting activity: {}/{}", package, resolved.name());
        state.show(resolved);
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.session_state()?;
        let focusable = state.element_mut(element)?.is_editable();
        if focusable {
            state.focused = Some(element.clone());
        }
        Ok(())
    }
}

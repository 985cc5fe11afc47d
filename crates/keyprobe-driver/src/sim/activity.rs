//! Screens of the simulated API demos application.

use keyprobe_core::capabilities::{API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY, TEXT_FIELDS_ACTIVITY};
use keyprobe_core::element::{EDIT_TEXT_CLASS, TEXT_VIEW_CLASS};
use keyprobe_core::ElementHandle;

/// Activities the simulated device can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Several editable fields, one of them a password field
    TextFields,
    /// An input field and a log view echoing key events
    KeyEventText,
}

impl Activity {
    /// Resolve a package/activity pair.
    pub fn resolve(package: &str, activity: &str) -> Option<Self> {
        if package != API_DEMOS_PACKAGE {
            return None;
        }
        match activity {
            TEXT_FIELDS_ACTIVITY => Some(Activity::TextFields),
            KEY_EVENT_ACTIVITY => Some(Activity::KeyEventText),
            _ => None,
        }
    }

    /// Fully qualified activity name.
    pub fn name(&self) -> &'static str {
        match self {
            Activity::TextFields => TEXT_FIELDS_ACTIVITY,
            Activity::KeyEventText => KEY_EVENT_ACTIVITY,
        }
    }

    /// Build the view hierarchy, issuing element ids from `next_id`.
    pub(crate) fn layout(&self, next_id: &mut u64) -> Vec<SimElement> {
        let mut issue = |class_name: &'static str, resource_id: &str, kind: FieldKind| {
            *next_id += 1;
            SimElement {
                handle: ElementHandle::new(format!("el-{next_id}")),
                class_name,
                resource_id: resource_id.to_string(),
                content_desc: None,
                text: String::new(),
                kind,
            }
        };

        match self {
            Activity::TextFields => {
                let mut label = issue(TEXT_VIEW_CLASS, "label", FieldKind::Static);
                label.text = "Views/TextFields".to_string();
                let mut password = issue(EDIT_TEXT_CLASS, "password", FieldKind::Password);
                password.content_desc = Some("Password");
                vec![
                    label,
                    issue(EDIT_TEXT_CLASS, "edit", FieldKind::Editable),
                    password,
                    issue(EDIT_TEXT_CLASS, "edit2", FieldKind::Editable),
                ]
            }
            Activity::KeyEventText => {
                let mut log = issue(TEXT_VIEW_CLASS, "log", FieldKind::Log);
                log.content_desc = Some("Key event log");
                vec![issue(EDIT_TEXT_CLASS, "text", FieldKind::Editable), log]
            }
        }
    }
}

/// How an element reacts to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Static,
    Editable,
    Password,
    Log,
}

/// An element in the simulated view hierarchy.
#[derive(Debug, Clone)]
pub(crate) struct SimElement {
    pub handle: ElementHandle,
    pub class_name: &'static str,
    pub resource_id: String,
    pub content_desc: Option<&'static str>,
    pub text: String,
    pub kind: FieldKind,
}

impl SimElement {
    pub fn is_editable(&self) -> bool {
        matches!(self.kind, FieldKind::Editable | FieldKind::Password)
    }
}

//! Behavioral tests for the simulated device.

use keyprobe_core::capabilities::{API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY};
use keyprobe_core::config::{LATIN_IME, UNICODE_IME, VOICE_IME};
use keyprobe_core::element::{EDIT_TEXT_CLASS, TEXT_VIEW_CLASS};
use keyprobe_core::{Capabilities, Error, KeyCode, LocatorStrategy, MetaState, SimulatorSettings};
use keyprobe_driver::sim::Activity;
use keyprobe_driver::{AutomationDriver, SimulatedDevice};

async fn last_edit_text(device: &SimulatedDevice) -> keyprobe_core::ElementHandle {
    device
        .find_elements(LocatorStrategy::ClassName, EDIT_TEXT_CLASS)
        .await
        .unwrap()
        .pop()
        .unwrap()
}

#[tokio::test]
async fn test_operations_require_session() {
    let device = SimulatedDevice::new();
    let result = device.is_locked().await;
    assert!(matches!(result, Err(Error::NoActiveSession)));

    let result = device.delete_session().await;
    assert!(matches!(result, Err(Error::NoActiveSession)));
}

#[tokio::test]
async fn test_second_session_rejected() {
    let device = SimulatedDevice::new();
    device.create_session(Capabilities::base()).await.unwrap();
    let result = device.create_session(Capabilities::base()).await;
    assert!(matches!(result, Err(Error::Driver(_))));
}

#[tokio::test]
async fn test_session_opens_app_activity() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    assert_eq!(device.current_activity(), Some(Activity::TextFields));

    let edits = device
        .find_elements(LocatorStrategy::ClassName, EDIT_TEXT_CLASS)
        .await
        .unwrap();
    assert_eq!(edits.len(), 3);
}

#[tokio::test]
async fn test_unknown_activity_rejected() {
    let device = SimulatedDevice::new();
    device.create_session(Capabilities::base()).await.unwrap();
    let result = device.start_activity(API_DEMOS_PACKAGE, ".Nope").await;
    assert!(matches!(result, Err(Error::Driver(msg)) if msg.contains(".Nope")));
}

#[tokio::test]
async fn test_unlock_counts_down() {
    let device = SimulatedDevice::with_settings(SimulatorSettings {
        unlock_calls_required: 2,
        ..SimulatorSettings::default()
    });
    device.create_session(Capabilities::base()).await.unwrap();

    assert!(device.is_locked().await.unwrap());
    device.unlock().await.unwrap();
    assert!(device.is_locked().await.unwrap());
    device.unlock().await.unwrap();
    assert!(!device.is_locked().await.unwrap());
    assert_eq!(device.unlock_calls(), 2);
}

#[tokio::test]
async fn test_set_value_and_clear() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    let el = last_edit_text(&device).await;

    device.set_value("Super-test.", &el).await.unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "Super-test.");

    device.clear(&el).await.unwrap();
    device.clear(&el).await.unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "");
}

#[tokio::test]
async fn test_editing_annotation_appended() {
    let device = SimulatedDevice::with_settings(SimulatorSettings {
        editing_annotation: true,
        ..SimulatorSettings::default()
    });
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    let el = last_edit_text(&device).await;

    device.set_value("&-", &el).await.unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "&-. Editing.");
}

#[tokio::test]
async fn test_password_field_is_masked() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    let password = device
        .find_element(LocatorStrategy::Id, "password")
        .await
        .unwrap();

    device.set_value("hunter2", &password).await.unwrap();
    assert_eq!(device.get_text(&password).await.unwrap(), "•••••••");
}

#[tokio::test]
async fn test_keys_type_into_focused_field() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    let el = last_edit_text(&device).await;

    let result = device.keys(&["x".to_string()]).await;
    assert!(matches!(result, Err(Error::Driver(_))));

    device.click(&el).await.unwrap();
    device
        .keys(&["&".to_string(), "-".to_string()])
        .await
        .unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "&-");
}

#[tokio::test]
async fn test_latin_keyboard_drops_other_scripts() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    device.activate_ime_engine(LATIN_IME).await.unwrap();
    let el = last_edit_text(&device).await;

    device.clear(&el).await.unwrap();
    device.keys(&["Mīna & chips".to_string()]).await.unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "Mna & chips");
}

#[tokio::test]
async fn test_unicode_keyboard_capability_and_reset() {
    let device = SimulatedDevice::new();
    assert_eq!(device.active_ime(), VOICE_IME);

    device
        .create_session(Capabilities::unicode_keyboard())
        .await
        .unwrap();
    assert_eq!(device.active_ime(), UNICODE_IME);

    let el = last_edit_text(&device).await;
    device.clear(&el).await.unwrap();
    device.keys(&["тестирование".to_string()]).await.unwrap();
    assert_eq!(device.get_text(&el).await.unwrap(), "тестирование");

    device.delete_session().await.unwrap();
    assert_eq!(device.active_ime(), VOICE_IME);
}

#[tokio::test]
async fn test_activate_unknown_ime_rejected() {
    let device = SimulatedDevice::new();
    device.create_session(Capabilities::base()).await.unwrap();
    let result = device.activate_ime_engine("com.example/.Ime").await;
    assert!(matches!(result, Err(Error::Driver(_))));
}

#[tokio::test]
async fn test_key_events_logged() {
    let device = SimulatedDevice::new();
    device.create_session(Capabilities::base()).await.unwrap();
    device
        .start_activity(API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY)
        .await
        .unwrap();

    device
        .press_key_code(KeyCode::A, Some(MetaState(193)))
        .await
        .unwrap();
    let log = device
        .find_elements(LocatorStrategy::ClassName, TEXT_VIEW_CLASS)
        .await
        .unwrap()
        .pop()
        .unwrap();
    let text = device.get_text(&log).await.unwrap();
    assert!(text.contains("[keycode=29]"));
    assert!(text.contains("keyCode=KEYCODE_A"));
    assert!(text.contains("metaState=META_SHIFT_ON"));
    assert_eq!(text.lines().count(), 2);
}

#[tokio::test]
async fn test_first_key_event_dropped() {
    let device = SimulatedDevice::with_settings(SimulatorSettings {
        drop_first_key_event: true,
        ..SimulatorSettings::default()
    });
    device.create_session(Capabilities::base()).await.unwrap();
    device
        .start_activity(API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY)
        .await
        .unwrap();
    let log = device
        .find_element(LocatorStrategy::Id, "log")
        .await
        .unwrap();

    device.press_key_code(KeyCode::MENU, None).await.unwrap();
    assert_eq!(device.get_text(&log).await.unwrap(), "");

    device.press_key_code(KeyCode::MENU, None).await.unwrap();
    assert!(device
        .get_text(&log)
        .await
        .unwrap()
        .contains("keyCode=KEYCODE_MENU"));
}

#[tokio::test]
async fn test_stale_element_after_activity_change() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();
    let el = last_edit_text(&device).await;
    device
        .start_activity(API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY)
        .await
        .unwrap();

    let result = device.get_text(&el).await;
    assert!(matches!(result, Err(Error::Driver(msg)) if msg.contains("stale")));
}

#[tokio::test]
async fn test_xpath_not_supported() {
    let device = SimulatedDevice::new();
    device.create_session(Capabilities::base()).await.unwrap();
    let result = device
        .find_elements(LocatorStrategy::XPath, "//android.widget.EditText")
        .await;
    assert!(matches!(result, Err(Error::Driver(_))));
}

#[tokio::test]
async fn test_accessibility_id_matches_content_description() {
    let device = SimulatedDevice::new();
    device
        .create_session(Capabilities::ascii_keyboard())
        .await
        .unwrap();

    let by_id = device
        .find_elements(LocatorStrategy::AccessibilityId, "password")
        .await
        .unwrap();
    assert!(by_id.is_empty());

    let by_desc = device
        .find_elements(LocatorStrategy::AccessibilityId, "Password")
        .await
        .unwrap();
    let by_resource = device
        .find_elements(LocatorStrategy::Id, "password")
        .await
        .unwrap();
    assert_eq!(by_desc.len(), 1);
    assert_eq!(by_desc, by_resource);

    device
        .start_activity(API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY)
        .await
        .unwrap();
    let log = device
        .find_element(LocatorStrategy::AccessibilityId, "Key event log")
        .await
        .unwrap();
    let last_view = device
        .find_elements(LocatorStrategy::ClassName, TEXT_VIEW_CLASS)
        .await
        .unwrap()
        .pop()
        .unwrap();
    assert_eq!(log, last_view);
}

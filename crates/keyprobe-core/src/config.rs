//! Configuration types for keyprobe.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Capabilities, Error, KeyEventCase, RetryPolicy, TestCase};

/// AOSP latin keyboard.
pub const LATIN_IME: &str = "com.android.inputmethod.latin/.LatinIME";

/// Keyboard that accepts arbitrary unicode text from the automation driver.
pub const UNICODE_IME: &str = "io.appium.settings/.UnicodeIME";

/// Voice input engine, present on most images and never wanted for typing.
pub const VOICE_IME: &str = "com.google.android.googlequicksearchbox/com.google.android.voicesearch.ime.VoiceInputMethodService";

/// Suite groups that can be selected.
pub const KNOWN_GROUPS: &[&str] = &["ascii", "unicode"];

/// Suite configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
#[serde(default)]
pub struct SuiteConfig {
    /// Suite settings
    pub suite: SuiteSettings,
    /// Unlock retry policy
    pub unlock: RetryPolicy,
    /// Capability overrides merged over each group's preset
    pub capabilities: Capabilities,
    /// Simulated device settings
    pub simulator: SimulatorSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl SuiteConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: SuiteConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.suite.case_attempts == 0 {
            return Err(Error::Config("suite.case_attempts must be > 0".to_string()));
        }

        if self.suite.case_timeout_ms == 0 {
            return Err(Error::Config("suite.case_timeout_ms must be > 0".to_string()));
        }

        for group in &self.suite.groups {
            if !KNOWN_GROUPS.contains(&group.as_str()) {
                return Err(Error::Config(format!("unknown suite group '{group}'")));
            }
        }

        for case in &self.suite.extra_key_events {
            case.key_code()
                .map_err(|e| Error::Config(format!("suite.extra_key_events: {e}")))?;
        }

        self.unlock
            .validate()
            .map_err(|e| Error::Config(format!("unlock: {e}")))?;

        if self.simulator.ime_engines.is_empty() {
            return Err(Error::Config(
                "simulator.ime_engines cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Suite settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SuiteSettings {
    /// Groups to run, in order
    pub groups: Vec<String>,
    /// Attempts per test case (whole case re-run, setup included)
    pub case_attempts: u32,
    /// Time budget per case attempt in milliseconds
    pub case_timeout_ms: u64,
    /// Pause after opening the key event activity, in milliseconds
    pub key_event_settle_ms: u64,
    /// Extra text cases appended to every group
    pub extra_cases: Vec<TestCase>,
    /// Extra key presses checked after the built-in key events
    pub extra_key_events: Vec<KeyEventCase>,
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            groups: KNOWN_GROUPS.iter().map(|g| g.to_string()).collect(),
            case_attempts: 3,
            case_timeout_ms: 60_000,
            key_event_settle_ms: 500,
            extra_cases: vec![],
            extra_key_events: vec![],
        }
    }
}

/// Simulated device settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Number of unlock calls before the device reports unlocked (0 = starts unlocked)
    pub unlock_calls_required: u32,
    /// Append ". Editing." to the text of editable fields
    pub editing_annotation: bool,
    /// Swallow the first key event sent to the device
    pub drop_first_key_event: bool,
    /// Installed input method engines; the first is active at boot
    pub ime_engines: Vec<String>,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            unlock_calls_required: 0,
            editing_annotation: false,
            drop_first_key_event: false,
            ime_engines: vec![
                VOICE_IME.to_string(),
                LATIN_IME.to_string(),
                UNICODE_IME.to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SuiteConfig::default();
        assert_eq!(config.suite.groups, vec!["ascii", "unicode"]);
        assert_eq!(config.suite.case_attempts, 3);
        assert_eq!(config.unlock.max_attempts, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
suite:
  groups: [unicode]
  case_attempts: 1
unlock:
  max_attempts: 4
  interval_ms: 0
capabilities:
  deviceName: emulator-5554
simulator:
  unlock_calls_required: 2
  editing_annotation: true
"#;
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.suite.groups, vec!["unicode"]);
        assert_eq!(config.suite.case_attempts, 1);
        assert_eq!(config.suite.case_timeout_ms, 60_000);
        assert_eq!(config.unlock, RetryPolicy::new(4, 0));
        assert_eq!(config.capabilities.get_str("deviceName"), Some("emulator-5554"));
        assert_eq!(config.simulator.unlock_calls_required, 2);
        assert!(config.simulator.editing_annotation);
        assert_eq!(config.simulator.ime_engines.len(), 3);
    }

    #[test]
    fn test_extra_cases() {
        let yaml = r#"
suite:
  extra_cases:
    - label: sending a tilde
      text: "~"
"#;
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.suite.extra_cases, vec![TestCase::new("sending a tilde", "~")]);
    }

    #[test]
    fn test_extra_key_events() {
        let yaml = r#"
suite:
  extra_key_events:
    - label: pressing enter
      key: KEYCODE_ENTER
    - label: shifted z
      key: Z
      meta: 65
"#;
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        let events = &config.suite.extra_key_events;
        assert_eq!(events[0], KeyEventCase::new("pressing enter", "KEYCODE_ENTER", 0));
        assert_eq!(events[1].key_code().unwrap(), crate::KeyCode(54));
    }

    #[test]
    fn test_validate_rejects_unknown_key() {
        let yaml = "suite:\n  extra_key_events:\n    - label: nope\n      key: KEYCODE_NOPE\n";
        let result = SuiteConfig::from_yaml(yaml);
        assert!(
            matches!(result, Err(Error::Config(msg)) if msg.starts_with("suite.extra_key_events:"))
        );
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let result = SuiteConfig::from_yaml("suite:\n  case_attempts: 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_group() {
        let result = SuiteConfig::from_yaml("suite:\n  groups: [latin]\n");
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("latin")));
    }

    #[test]
    fn test_validate_rejects_zero_unlock_attempts() {
        let result = SuiteConfig::from_yaml("unlock:\n  max_attempts: 0\n");
        assert!(matches!(result, Err(Error::Config(msg)) if msg.starts_with("unlock:")));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = SuiteConfig::from_yaml("suite: [not, a, map]");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

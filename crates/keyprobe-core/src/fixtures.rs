//! Built-in keyboard test cases.

use lazy_static::lazy_static;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{KeyCode, MetaState, Result};

/// An input string and a human-readable description of what it exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestCase {
    /// Description
    pub label: String,
    /// Text to enter
    pub text: String,
}

impl TestCase {
    /// Create a test case.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A key press checked against the key event display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeyEventCase {
    /// Description
    pub label: String,
    /// Key name (`KEYCODE_ENTER`, `ENTER`) or decimal code
    pub key: String,
    /// Meta-state bits sent with the key (0 sends none)
    #[serde(default)]
    pub meta: u32,
}

impl KeyEventCase {
    /// Create a key event case.
    pub fn new(label: impl Into<String>, key: impl Into<String>, meta: u32) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            meta,
        }
    }

    /// Resolve the key name.
    pub fn key_code(&self) -> Result<KeyCode> {
        self.key.parse()
    }

    /// Meta state to send, if any.
    pub fn meta_state(&self) -> Option<MetaState> {
        (self.meta != 0).then_some(MetaState(self.meta))
    }

    /// Fragments the display must contain after the press.
    pub fn expected_fragments(&self) -> Result<Vec<String>> {
        let code = self.key_code()?;
        let mut fragments = vec![
            format!("[keycode={}]", code.code()),
            format!("keyCode={}", code.name()),
        ];
        if let Some(meta) = self.meta_state() {
            fragments.push(format!("metaState={}", meta.symbolic()));
        }
        Ok(fragments)
    }
}

fn table(rows: &[(&str, &str)]) -> Vec<TestCase> {
    rows.iter()
        .map(|(label, text)| TestCase::new(*label, *text))
        .collect()
}

lazy_static! {
    /// Plain ASCII text, including the `&` and `-` characters some keyboards mangle.
    pub static ref ASCII_CASES: Vec<TestCase> = table(&[
        ("editing a text field", "Life, the Universe and Everything."),
        ("sending '&-'", "&-"),
        (
            "sending '&' and '-' in other text",
            "In the mid-1990s he ate fish & chips as mayor-elect.",
        ),
        ("sending '-' in text", "Super-test."),
        ("sending numbers", "0123456789"),
    ]);

    /// Non-ASCII text mixed with ASCII punctuation.
    pub static ref UNICODE_CASES: Vec<TestCase> = table(&[
        ("sending '-' in unicode text", "परीक्षा-परीक्षण"),
        ("sending '&' in text", "Fish & chips"),
        ("sending '&' in unicode text", "Mīna & chips"),
        ("sending roman characters with diacritics", "Áé Œ ù ḍ"),
        ("sending a 'u' with an umlaut", "ü"),
    ]);

    /// One word in each of several scripts.
    pub static ref LANGUAGE_CASES: Vec<TestCase> = table(&[
        ("sending Tamil", "சோதனை"),
        ("sending Chinese", "测试"),
        ("sending Russian", "тестирование"),
        ("sending Arabic", "تجريب"),
        ("sending Hebrew", "בדיקות"),
    ]);
}

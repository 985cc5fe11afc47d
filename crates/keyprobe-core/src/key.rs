//! Android key codes and meta state.

use std::ops::BitOr;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Named key codes outside the contiguous digit and letter ranges.
const NAMED_KEYS: &[(u32, &str)] = &[
    (0, "UNKNOWN"),
    (1, "SOFT_LEFT"),
    (2, "SOFT_RIGHT"),
    (3, "HOME"),
    (4, "BACK"),
    (5, "CALL"),
    (6, "ENDCALL"),
    (17, "STAR"),
    (18, "POUND"),
    (19, "DPAD_UP"),
    (20, "DPAD_DOWN"),
    (21, "DPAD_LEFT"),
    (22, "DPAD_RIGHT"),
    (23, "DPAD_CENTER"),
    (24, "VOLUME_UP"),
    (25, "VOLUME_DOWN"),
    (26, "POWER"),
    (27, "CAMERA"),
    (28, "CLEAR"),
    (55, "COMMA"),
    (56, "PERIOD"),
    (57, "ALT_LEFT"),
    (58, "ALT_RIGHT"),
    (59, "SHIFT_LEFT"),
    (60, "SHIFT_RIGHT"),
    (61, "TAB"),
    (62, "SPACE"),
    (63, "SYM"),
    (64, "EXPLORER"),
    (65, "ENVELOPE"),
    (66, "ENTER"),
    (67, "DEL"),
    (68, "GRAVE"),
    (69, "MINUS"),
    (70, "EQUALS"),
    (71, "LEFT_BRACKET"),
    (72, "RIGHT_BRACKET"),
    (73, "BACKSLASH"),
    (74, "SEMICOLON"),
    (75, "APOSTROPHE"),
    (76, "SLASH"),
    (77, "AT"),
    (78, "NUM"),
    (79, "HEADSETHOOK"),
    (80, "FOCUS"),
    (81, "PLUS"),
    (82, "MENU"),
    (83, "NOTIFICATION"),
    (84, "SEARCH"),
    (111, "ESCAPE"),
    (112, "FORWARD_DEL"),
    (113, "CTRL_LEFT"),
    (114, "CTRL_RIGHT"),
    (115, "CAPS_LOCK"),
];

const DIGIT_BASE: u32 = 7;
const LETTER_BASE: u32 = 29;

/// Android key code (`KeyEvent.KEYCODE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Letter A
    pub const A: KeyCode = KeyCode(29);
    /// Menu key
    pub const MENU: KeyCode = KeyCode(82);

    /// Raw code.
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Android symbolic name (`KEYCODE_MENU`), or the decimal code when the
    /// key has no known name.
    pub fn name(&self) -> String {
        match self.0 {
            c @ DIGIT_BASE..=16 => format!("KEYCODE_{}", c - DIGIT_BASE),
            c @ LETTER_BASE..=54 => {
                let letter = char::from(b'A' + (c - LETTER_BASE) as u8);
                format!("KEYCODE_{letter}")
            }
            c => NAMED_KEYS
                .iter()
                .find(|(code, _)| *code == c)
                .map(|(_, name)| format!("KEYCODE_{name}"))
                .unwrap_or_else(|| c.to_string()),
        }
    }

    /// Parse a symbolic name (`KEYCODE_MENU` or `MENU`) or a decimal code.
    pub fn from_name(name: &str) -> Result<Self> {
        if let Ok(code) = name.parse::<u32>() {
            return Ok(KeyCode(code));
        }

        let bare = name.strip_prefix("KEYCODE_").unwrap_or(name);
        let mut chars = bare.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() {
                return Ok(KeyCode(DIGIT_BASE + c as u32 - '0' as u32));
            }
            if c.is_ascii_uppercase() {
                return Ok(KeyCode(LETTER_BASE + c as u32 - 'A' as u32));
            }
        }

        NAMED_KEYS
            .iter()
            .find(|(_, n)| *n == bare)
            .map(|(code, _)| KeyCode(*code))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown key code: {name}")))
    }
}

impl FromStr for KeyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Symbolic names of meta-state bits, in bit order.
const META_NAMES: &[(u32, &str)] = &[
    (0x1, "META_SHIFT_ON"),
    (0x2, "META_ALT_ON"),
    (0x4, "META_SYM_ON"),
    (0x8, "META_FUNCTION_ON"),
    (0x10, "META_ALT_LEFT_ON"),
    (0x20, "META_ALT_RIGHT_ON"),
    (0x40, "META_SHIFT_LEFT_ON"),
    (0x80, "META_SHIFT_RIGHT_ON"),
    (0x100, "META_CAP_LOCKED"),
    (0x200, "META_ALT_LOCKED"),
    (0x400, "META_SYM_LOCKED"),
    (0x800, "META_SELECTING"),
    (0x1000, "META_CTRL_ON"),
    (0x2000, "META_CTRL_LEFT_ON"),
    (0x4000, "META_CTRL_RIGHT_ON"),
    (0x10000, "META_META_ON"),
    (0x20000, "META_META_LEFT_ON"),
    (0x40000, "META_META_RIGHT_ON"),
    (0x100000, "META_CAPS_LOCK_ON"),
    (0x200000, "META_NUM_LOCK_ON"),
    (0x400000, "META_SCROLL_LOCK_ON"),
];

/// Android meta-state bit set (`KeyEvent.META_*`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MetaState(pub u32);

impl MetaState {
    /// No modifiers
    pub const NONE: MetaState = MetaState(0);
    /// Either shift key
    pub const SHIFT_ON: MetaState = MetaState(0x1);
    /// Left shift
    pub const SHIFT_LEFT_ON: MetaState = MetaState(0x40);
    /// Right shift
    pub const SHIFT_RIGHT_ON: MetaState = MetaState(0x80);

    /// Android rendering: `0` when empty, otherwise `|`-joined symbolic
    /// names, with unnamed bits as hex.
    pub fn symbolic(&self) -> String {
        if self.0 == 0 {
            return "0".to_string();
        }

        let mut parts = Vec::new();
        let mut rest = self.0;
        for (bit, name) in META_NAMES {
            if rest & bit != 0 {
                parts.push((*name).to_string());
                rest &= !bit;
            }
        }
        if rest != 0 {
            parts.push(format!("0x{rest:x}"));
        }
        parts.join("|")
    }
}

impl BitOr for MetaState {
    type Output = MetaState;

    fn bitor(self, rhs: Self) -> Self::Output {
        MetaState(self.0 | rhs.0)
    }
}

impl std::fmt::Display for MetaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbolic())
    }
}

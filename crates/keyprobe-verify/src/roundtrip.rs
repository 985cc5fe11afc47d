//! Input round-trip verification.
//!
//! Text goes into an input surface through one of two input methods and is
//! read back. The read-back only has to be recoverable from what was written:
//! it must be a substring of the target after normalization, since some
//! platforms re-render certain glyphs on display.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use keyprobe_core::element::EDIT_TEXT_CLASS;
use keyprobe_core::{ElementHandle, Error, LocatorStrategy, Result};
use keyprobe_driver::{AutomationDriver, SessionContext};

/// Suffix some platforms append to the accessibility text of editable fields.
pub const EDITING_SUFFIX: &str = ". Editing.";

/// How text is delivered to the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Assign the element's value directly
    SetValue,
    /// Simulate the keystrokes that spell the text
    Keystrokes,
}

impl InputMode {
    /// Both modes, in suite order.
    pub const ALL: [InputMode; 2] = [InputMode::SetValue, InputMode::Keystrokes];

    /// Short name used in case labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::SetValue => "setValue",
            InputMode::Keystrokes => "keys",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the platform editing annotation, if present.
pub fn normalize(text: &str) -> &str {
    text.strip_suffix(EDITING_SUFFIX).unwrap_or(text)
}

/// Check that `observed` (already normalized) is recoverable from `expected`.
pub fn check_round_trip(expected: &str, observed: &str) -> Result<()> {
    if expected.contains(observed) {
        Ok(())
    } else {
        Err(Error::RoundTripMismatch {
            expected: expected.to_string(),
            observed: observed.to_string(),
        })
    }
}

/// Clear `element`, write `text` with `mode`, read it back and compare.
///
/// Returns the normalized read-back text.
#[instrument(skip(ctx), fields(session = %ctx.id()))]
pub async fn verify_round_trip<D: AutomationDriver>(
    ctx: &SessionContext<D>,
    element: &ElementHandle,
    text: &str,
    mode: InputMode,
) -> Result<String> {
    let driver = ctx.driver();
    driver.clear(element).await?;

    match mode {
        InputMode::SetValue => driver.set_value(text, element).await?,
        InputMode::Keystrokes => driver.keys(&[text.to_string()]).await?,
    }

    let raw = driver.get_text(element).await?;
    let observed = normalize(&raw);
    debug!("Read back {:?} (raw {:?})", observed, raw);

    check_round_trip(text, observed)?;
    Ok(observed.to_string())
}

/// Round-trip `text` through the last editable text field on screen.
pub async fn run_text_edit<D: AutomationDriver>(
    ctx: &SessionContext<D>,
    text: &str,
    mode: InputMode,
) -> Result<ElementHandle> {
    let element = ctx.find_last(LocatorStrategy::ClassName, EDIT_TEXT_CLASS).await?;
    verify_round_trip(ctx, &element, text, mode).await?;
    Ok(element)
}

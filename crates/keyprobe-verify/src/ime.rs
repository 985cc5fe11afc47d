//! Input method selection.

use tracing::info;

use keyprobe_core::{Error, Result};
use keyprobe_driver::{AutomationDriver, SessionContext};

/// Package fragment identifying the platform latin keyboard.
pub const LATIN_IME_MARKER: &str = "android.inputmethod";

/// Pick the engine to type ASCII with: the last engine whose name contains
/// `android.inputmethod`, otherwise the first one listed.
pub fn select_ime_engine(engines: &[String]) -> Option<&str> {
    engines
        .iter()
        .rev()
        .find(|engine| engine.contains(LATIN_IME_MARKER))
        .or_else(|| engines.first())
        .map(String::as_str)
}

/// Activate the latin keyboard, since the device default is not always the
/// one the ascii cases expect.
pub async fn activate_latin_ime<D: AutomationDriver>(ctx: &SessionContext<D>) -> Result<String> {
    let engines = ctx.driver().available_ime_engines().await?;
    let engine = select_ime_engine(&engines)
        .ok_or_else(|| Error::InvalidInput("device reports no IME engines".to_string()))?
        .to_string();

    info!("Selected IME engine {} of {}", engine, engines.len());
    ctx.driver().activate_ime_engine(&engine).await?;
    Ok(engine)
}

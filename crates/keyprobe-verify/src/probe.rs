//! Key event probes.
//!
//! A key event can reach the device before its listener is ready, leaving
//! the display empty. `probe_event` gives such a probe one more try.

use std::future::Future;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use keyprobe_core::capabilities::{API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY};
use keyprobe_core::element::TEXT_VIEW_CLASS;
use keyprobe_core::{Error, KeyCode, LocatorStrategy, MetaState, Result};
use keyprobe_driver::{AutomationDriver, SessionContext};

/// Attempts a probe gets before an empty display counts as failure.
pub const PROBE_ATTEMPTS: u32 = 2;

lazy_static! {
    static ref KEY_EVENT_LINE: Regex = Regex::new(
        r"\[keycode=(?P<code>\d+)\].*?action=(?P<action>\w+).*?keyCode=(?P<name>\w+).*?metaState=(?P<meta>[\w|]+)"
    )
    .expect("key event pattern is valid");
}

/// One key event parsed from the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEventRecord {
    /// Numeric key code
    pub code: KeyCode,
    /// `ACTION_DOWN` or `ACTION_UP`
    pub action: String,
    /// Symbolic key name as displayed
    pub name: String,
    /// Meta state as displayed
    pub meta: String,
}

impl KeyEventRecord {
    /// Parse every key event line in a display text. Lines that are not key
    /// events are skipped.
    pub fn parse_all(display: &str) -> Vec<KeyEventRecord> {
        display
            .lines()
            .filter_map(|line| {
                let caps = KEY_EVENT_LINE.captures(line)?;
                let code = caps["code"].parse::<u32>().ok()?;
                Some(KeyEventRecord {
                    code: KeyCode(code),
                    action: caps["action"].to_string(),
                    name: caps["name"].to_string(),
                    meta: caps["meta"].to_string(),
                })
            })
            .collect()
    }
}

/// Run `action`; if it yields an empty string, run it exactly once more.
///
/// An empty result after the second attempt is `EventNotObserved`. Errors
/// from `action` are returned immediately.
pub async fn probe_event<F, Fut>(mut action: F) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    for attempt in 1..=PROBE_ATTEMPTS {
        let text = action().await?;
        if !text.is_empty() {
            return Ok(text);
        }
        warn!("Key event display empty: attempt={}/{}", attempt, PROBE_ATTEMPTS);
    }
    Err(Error::EventNotObserved {
        attempts: PROBE_ATTEMPTS,
    })
}

/// Press a key and read the key event display.
pub async fn press_and_read<D: AutomationDriver>(
    ctx: &SessionContext<D>,
    code: KeyCode,
    meta: Option<MetaState>,
) -> Result<String> {
    ctx.driver().press_key_code(code, meta).await?;
    let display = ctx.find_last(LocatorStrategy::ClassName, TEXT_VIEW_CLASS).await?;
    ctx.driver().get_text(&display).await
}

/// Open the key event activity, press a key and require every fragment in
/// `expected` to appear in the display.
pub async fn run_key_event_test<D: AutomationDriver>(
    ctx: &SessionContext<D>,
    code: KeyCode,
    meta: Option<MetaState>,
    expected: &[&str],
    settle: Duration,
) -> Result<Vec<KeyEventRecord>> {
    ctx.driver()
        .start_activity(API_DEMOS_PACKAGE, KEY_EVENT_ACTIVITY)
        .await?;
    tokio::time::sleep(settle).await;

    let display = probe_event(|| press_and_read(ctx, code, meta)).await?;

    for fragment in expected {
        if !display.contains(fragment) {
            return Err(Error::EventMismatch {
                expected: fragment.to_string(),
                observed: display,
            });
        }
    }

    let records = KeyEventRecord::parse_all(&display);
    debug!("Observed {} key event(s) for {}", records.len(), code);
    Ok(records)
}

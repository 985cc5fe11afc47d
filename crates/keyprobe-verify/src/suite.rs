//! The keyboard suite.
//!
//! Two groups, each in its own session: `ascii` types plain text through the
//! latin keyboard, `unicode` types every table through the unicode keyboard.
//! Both finish with the key event probes. Cases run in declaration order and
//! fail independently; only a failed group setup ends a group early.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use keyprobe_core::capabilities::{API_DEMOS_PACKAGE, TEXT_FIELDS_ACTIVITY};
use keyprobe_core::element::EDIT_TEXT_CLASS;
use keyprobe_core::fixtures::{ASCII_CASES, LANGUAGE_CASES, UNICODE_CASES};
use keyprobe_core::{
    Capabilities, Error, KeyCode, LocatorStrategy, MetaState, Result, SuiteConfig, TestCase,
};
use keyprobe_driver::{with_session, AutomationDriver, SessionContext};

use crate::ime::activate_latin_ime;
use crate::probe::run_key_event_test;
use crate::report::{GroupReport, SuiteReport};
use crate::roundtrip::{run_text_edit, InputMode};
use crate::runner::CaseRunner;
use crate::unlock::ensure_unlocked;

const PASSWORD_TEXT: &str = "super-duper password";

/// A suite group: one session, one capability preset, one set of cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteGroup {
    /// Latin keyboard, ASCII text
    Ascii,
    /// Unicode keyboard, every script
    Unicode,
}

impl SuiteGroup {
    /// Look up a group by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ascii" => Some(SuiteGroup::Ascii),
            "unicode" => Some(SuiteGroup::Unicode),
            _ => None,
        }
    }

    /// Group name.
    pub fn name(&self) -> &'static str {
        match self {
            SuiteGroup::Ascii => "ascii",
            SuiteGroup::Unicode => "unicode",
        }
    }

    /// Capability preset for the group's session.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            SuiteGroup::Ascii => Capabilities::ascii_keyboard(),
            SuiteGroup::Unicode => Capabilities::unicode_keyboard(),
        }
    }

    /// Built-in text cases, in order.
    pub fn cases(&self) -> Vec<TestCase> {
        match self {
            SuiteGroup::Ascii => ASCII_CASES.clone(),
            SuiteGroup::Unicode => ASCII_CASES
                .iter()
                .chain(UNICODE_CASES.iter())
                .chain(LANGUAGE_CASES.iter())
                .cloned()
                .collect(),
        }
    }
}

async fn open_text_fields<D: AutomationDriver>(ctx: &SessionContext<D>) -> Result<()> {
    ctx.driver()
        .start_activity(API_DEMOS_PACKAGE, TEXT_FIELDS_ACTIVITY)
        .await
}

/// Runs the keyboard suite against any driver.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSuite {
    config: SuiteConfig,
}

impl KeyboardSuite {
    /// Create a suite from configuration.
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn runner(&self) -> CaseRunner {
        CaseRunner::new(
            self.config.suite.case_attempts,
            Duration::from_millis(self.config.suite.case_timeout_ms),
        )
    }

    /// Run every configured group, each against a fresh driver from
    /// `make_driver`.
    pub async fn run<D, M>(&self, mut make_driver: M) -> SuiteReport
    where
        D: AutomationDriver,
        M: FnMut() -> D,
    {
        let started_at = Utc::now();
        let mut groups = Vec::new();

        for name in &self.config.suite.groups {
            let report = match SuiteGroup::from_name(name) {
                Some(group) => self.run_group(group, Arc::new(make_driver())).await,
                None => GroupReport {
                    group: name.clone(),
                    setup_error: Some(format!("unknown suite group '{name}'")),
                    cases: vec![],
                },
            };
            groups.push(report);
        }

        SuiteReport {
            started_at,
            finished_at: Utc::now(),
            groups,
        }
    }

    /// Run one group inside its own session.
    pub async fn run_group<D: AutomationDriver>(
        &self,
        group: SuiteGroup,
        driver: Arc<D>,
    ) -> GroupReport {
        let name = group.name();
        info!("Running group: {}", name);

        let runner = self.runner();
        let unlock = self.config.unlock;
        let settle = Duration::from_millis(self.config.suite.key_event_settle_ms);
        let capabilities = group.capabilities().merge(self.config.capabilities.clone());
        let mut cases = group.cases();
        cases.extend(self.config.suite.extra_cases.iter().cloned());
        let key_events = self.config.suite.extra_key_events.clone();

        let mut outcomes = Vec::new();
        let sink = &mut outcomes;
        let runner = &runner;

        let result = with_session(driver, capabilities, |ctx| async move {
            let ctx = &ctx;
            ensure_unlocked(ctx, &unlock).await?;
            if group == SuiteGroup::Ascii {
                activate_latin_ime(ctx).await?;
            }

            for case in &cases {
                for mode in InputMode::ALL {
                    let label = format!("{name} / {} / {mode}", case.label);
                    let outcome = runner
                        .run(&label, || async move {
                            open_text_fields(ctx).await?;
                            run_text_edit(ctx, &case.text, mode).await.map(|_| ())
                        })
                        .await;
                    sink.push(outcome);
                }
            }

            if group == SuiteGroup::Ascii {
                let label = format!("{name} / clearing a password field");
                let outcome = runner
                    .run(&label, || async move {
                        open_text_fields(ctx).await?;
                        let field = ctx
                            .find_nth(LocatorStrategy::ClassName, EDIT_TEXT_CLASS, 1)
                            .await?;
                        ctx.driver().set_value(PASSWORD_TEXT, &field).await?;
                        ctx.driver().clear(&field).await
                    })
                    .await;
                sink.push(outcome);
            }

            let label = format!("{name} / combination key event");
            let outcome = runner
                .run(&label, || async move {
                    run_key_event_test(
                        ctx,
                        KeyCode::A,
                        Some(MetaState::SHIFT_ON | MetaState::SHIFT_LEFT_ON | MetaState::SHIFT_RIGHT_ON),
                        &["keyCode=KEYCODE_A", "metaState=META_SHIFT_ON"],
                        settle,
                    )
                    .await
                    .map(|_| ())
                })
                .await;
            sink.push(outcome);

            let label = format!("{name} / key event");
            let outcome = runner
                .run(&label, || async move {
                    run_key_event_test(
                        ctx,
                        KeyCode::MENU,
                        None,
                        &["[keycode=82]", "keyCode=KEYCODE_MENU"],
                        settle,
                    )
                    .await
                    .map(|_| ())
                })
                .await;
            sink.push(outcome);

            for case in &key_events {
                let label = format!("{name} / {}", case.label);
                let outcome = runner
                    .run(&label, || async move {
                        let fragments = case.expected_fragments()?;
                        let fragments: Vec<&str> = fragments.iter().map(String::as_str).collect();
                        run_key_event_test(ctx, case.key_code()?, case.meta_state(), &fragments, settle)
                            .await
                            .map(|_| ())
                    })
                    .await;
                sink.push(outcome);
            }

            Ok::<_, Error>(())
        })
        .await;

        let setup_error = match result {
            Ok(()) => None,
            Err(e) => {
                warn!("Group {} aborted: {}", name, e);
                Some(e.to_string())
            }
        };

        GroupReport {
            group: name.to_string(),
            setup_error,
            cases: outcomes,
        }
    }
}

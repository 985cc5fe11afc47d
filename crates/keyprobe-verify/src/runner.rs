//! Whole-case retries.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use keyprobe_core::{Error, Result};

/// Final status of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    /// The case passed on some attempt
    Passed,
    /// Every attempt failed; carries the last error
    Failed {
        /// Last error message
        error: String,
    },
}

/// Result of running one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Case label
    pub label: String,
    /// Attempts used
    pub attempts: u32,
    /// Total time across attempts in milliseconds
    pub duration_ms: u64,
    /// Final status
    #[serde(flatten)]
    pub status: CaseStatus,
}

impl CaseOutcome {
    /// Whether the case passed.
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Re-runs a failed case from its own setup, bounding each attempt in time.
#[derive(Debug, Clone, Copy)]
pub struct CaseRunner {
    attempts: u32,
    timeout: Duration,
}

impl CaseRunner {
    /// Create a runner. `attempts` is raised to at least one.
    pub fn new(attempts: u32, timeout: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            timeout,
        }
    }

    /// Attempts per case.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run `case` until it passes or the attempt budget is spent.
    ///
    /// `case` is called once per attempt and must perform its own setup. An
    /// attempt that outlives the timeout is abandoned and counts as
    /// `CaseTimeout`.
    pub async fn run<F, Fut>(&self, label: &str, mut case: F) -> CaseOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let start = Instant::now();
        let mut last_error = None;
        let mut used = 0;

        for attempt in 1..=self.attempts {
            used = attempt;
            let result = match tokio::time::timeout(self.timeout, case()).await {
                Ok(result) => result,
                Err(_) => Err(Error::CaseTimeout(self.timeout.as_millis() as u64)),
            };

            match result {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) => {
                    warn!(
                        "Case failed: label={}, attempt={}/{}, error={}",
                        label, attempt, self.attempts, e
                    );
                    last_error = Some(e);
                }
            }
        }

        let status = match last_error {
            None => {
                info!("Case passed: label={}, attempts={}", label, used);
                CaseStatus::Passed
            }
            Some(e) => CaseStatus::Failed {
                error: e.to_string(),
            },
        };

        CaseOutcome {
            label: label.to_string(),
            attempts: used,
            duration_ms: start.elapsed().as_millis() as u64,
            status,
        }
    }
}

impl Default for CaseRunner {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_passes_first_time() {
        let runner = CaseRunner::default();
        let calls = Cell::new(0);
        let outcome = runner
            .run("ok", || {
                calls.set(calls.get() + 1);
                async { Ok(()) }
            })
            .await;

        assert!(outcome.passed());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_stops_at_first_pass() {
        let runner = CaseRunner::new(3, Duration::from_secs(5));
        let calls = Cell::new(0);
        let outcome = runner
            .run("flaky", || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 2 {
                        Err(Error::Other("not yet".to_string()))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(outcome.passed());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_reports_last_error_after_budget() {
        let runner = CaseRunner::new(3, Duration::from_secs(5));
        let calls = Cell::new(0);
        let outcome = runner
            .run("broken", || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { Err(Error::Other(format!("failure {n}"))) }
            })
            .await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(
            outcome.status,
            CaseStatus::Failed {
                error: "failure 3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_attempt_timeout() {
        let runner = CaseRunner::new(1, Duration::from_millis(20));
        let outcome = runner
            .run("slow", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(
            outcome.status,
            CaseStatus::Failed {
                error: "Test case timed out after 20ms".to_string()
            }
        );
    }

    #[test]
    fn test_zero_attempts_raised_to_one() {
        assert_eq!(CaseRunner::new(0, Duration::from_secs(1)).attempts(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CaseOutcome {
            label: "ascii / sending numbers / keys".to_string(),
            attempts: 1,
            duration_ms: 12,
            status: CaseStatus::Failed {
                error: "boom".to_string(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["attempts"], 1);
    }
}

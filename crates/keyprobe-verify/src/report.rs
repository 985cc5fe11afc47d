//! Suite reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keyprobe_core::Result;

use crate::runner::CaseOutcome;

/// Results of one suite group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Group name
    pub group: String,
    /// Error that aborted the group's setup or teardown, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_error: Option<String>,
    /// Case outcomes in execution order
    pub cases: Vec<CaseOutcome>,
}

impl GroupReport {
    /// Whether setup succeeded and every case passed.
    pub fn is_success(&self) -> bool {
        self.setup_error.is_none() && self.cases.iter().all(CaseOutcome::passed)
    }
}

/// Results of a whole suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Group results in execution order
    pub groups: Vec<GroupReport>,
}

impl SuiteReport {
    /// Number of passed cases.
    pub fn passed(&self) -> usize {
        self.cases().filter(|c| c.passed()).count()
    }

    /// Number of failed cases.
    pub fn failed(&self) -> usize {
        self.cases().filter(|c| !c.passed()).count()
    }

    /// Whether every group succeeded.
    pub fn is_success(&self) -> bool {
        self.groups.iter().all(GroupReport::is_success)
    }

    /// Iterate over every case outcome.
    pub fn cases(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.groups.iter().flat_map(|g| g.cases.iter())
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary, one line per case.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            out.push_str(&format!("{}\n", group.group));
            if let Some(error) = &group.setup_error {
                out.push_str(&format!("  setup failed: {error}\n"));
            }
            for case in &group.cases {
                let mark = if case.passed() { "ok  " } else { "FAIL" };
                out.push_str(&format!("  {mark} {}", case.label));
                if case.attempts > 1 {
                    out.push_str(&format!(" ({} attempts)", case.attempts));
                }
                out.push('\n');
            }
        }
        let elapsed = self.finished_at - self.started_at;
        out.push_str(&format!(
            "{} passed, {} failed in {}ms\n",
            self.passed(),
            self.failed(),
            elapsed.num_milliseconds()
        ));
        out
    }
}

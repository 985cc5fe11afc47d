//! # keyprobe-verify
//!
//! Verification helpers and the keyboard suite.
//!
//! This crate provides:
//! - `converge`: poll a predicate, act, wait, up to a retry budget
//! - Input round trips: clear, write (direct or keystrokes), read back, normalize, compare
//! - `probe_event`: one extra attempt when a key event display comes back empty
//! - `CaseRunner`: whole-case retries bounded by a per-attempt timeout
//! - `KeyboardSuite`: the ascii and unicode keyboard groups
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on keyprobe-core and
//! keyprobe-driver, and works against any `AutomationDriver`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ime;
pub mod probe;
pub mod report;
pub mod retry;
pub mod roundtrip;
pub mod runner;
pub mod suite;
pub mod unlock;

// Re-export commonly used types
pub use ime::{activate_latin_ime, select_ime_engine};
pub use probe::{probe_event, run_key_event_test, KeyEventRecord};
pub use report::{GroupReport, SuiteReport};
pub use retry::{converge, Convergence, Observation};
pub use roundtrip::{check_round_trip, normalize, run_text_edit, verify_round_trip, InputMode};
pub use runner::{CaseOutcome, CaseRunner, CaseStatus};
pub use suite::{KeyboardSuite, SuiteGroup};
pub use unlock::ensure_unlocked;

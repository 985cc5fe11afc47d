//! Error types for keyprobe.

use thiserror::Error;

/// Main error type for keyprobe operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Retry budget exhausted before the target state was reached
    #[error("State did not converge after {attempts} attempt(s): {last_state}")]
    ConvergenceTimeout {
        /// Number of evaluations performed
        attempts: u32,
        /// Description of the last observed state
        last_state: String,
    },

    /// Text read back from an input surface does not match what was written
    #[error("Round trip mismatch: expected {expected:?}, observed {observed:?}")]
    RoundTripMismatch {
        /// Text that was written
        expected: String,
        /// Normalized text that was read back
        observed: String,
    },

    /// Locator resolved to no element
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Key event display stayed empty
    #[error("Key event not observed after {attempts} attempt(s)")]
    EventNotObserved {
        /// Number of probe attempts
        attempts: u32,
    },

    /// Key event display is missing an expected fragment
    #[error("Key event display missing {expected:?}: {observed:?}")]
    EventMismatch {
        /// Fragment that was expected
        expected: String,
        /// Display text that was observed
        observed: String,
    },

    /// Test case exceeded its time budget
    #[error("Test case timed out after {0}ms")]
    CaseTimeout(u64),

    /// Operation requires an active session
    #[error("No active session")]
    NoActiveSession,

    /// Failure reported by the automation driver
    #[error("Driver error: {0}")]
    Driver(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input or parameters (generic)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

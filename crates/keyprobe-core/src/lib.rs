//! # keyprobe-core
//!
//! Core types for keyprobe.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other keyprobe crates. It provides:
//!
//! - Session types (SessionId, SessionHandle)
//! - Capabilities (named session options merged over base defaults)
//! - Android key codes and meta state
//! - Element handles and locator strategies
//! - Retry policy
//! - Built-in keyboard test cases
//! - YAML configuration
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other keyprobe crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capabilities;
pub mod config;
pub mod element;
pub mod error;
pub mod fixtures;
pub mod key;
pub mod policy;
pub mod session;

// Re-export commonly used types
pub use capabilities::Capabilities;
pub use config::{LoggingSettings, SimulatorSettings, SuiteConfig, SuiteSettings};
pub use element::{ElementHandle, LocatorStrategy};
pub use error::{Error, Result};
pub use fixtures::{KeyEventCase, TestCase};
pub use key::{KeyCode, MetaState};
pub use policy::RetryPolicy;
pub use session::{SessionHandle, SessionId};

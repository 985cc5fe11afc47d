//! # keyprobe-driver
//!
//! The automation driver contract consumed by keyprobe.
//!
//! This crate provides:
//! - The `AutomationDriver` async trait (and its local, non-`Send` variant)
//! - `SessionContext` and `with_session` for scoped session lifecycles
//! - `SimulatedDevice`, an in-memory driver modelling the API demos app
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on keyprobe-core only.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod driver;
pub mod sim;

// Re-export commonly used types
pub use context::{with_session, SessionContext};
pub use driver::{AutomationDriver, LocalAutomationDriver};
pub use sim::SimulatedDevice;

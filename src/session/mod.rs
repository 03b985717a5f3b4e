//! Presentation-side control of a running simulation

pub mod scheduler;
pub mod state;

pub use scheduler::{FixedInterval, Immediate, Scheduler};
pub use state::{RunState, RunSummary, Session, StopReason};

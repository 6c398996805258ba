//! Shared utilities.
//!
//! - [`tracing`]: `security_event!` and `audit_event!` logging macros

pub mod tracing;

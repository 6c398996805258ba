//! # SkillSphere Core
//!
//! Core types shared by every SkillSphere crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use skillsphere_core::AppError;
//!
//! let error = AppError::not_found("Course not found");
//! ```

pub mod errors;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};

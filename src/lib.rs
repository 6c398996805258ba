//! # SkillSphere API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for an online course
//! marketplace: a public course catalogue plus authenticated course
//! management and student enrollments.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── skillsphere-core/    # AppError, error body, serde helpers
//! ├── skillsphere-config/  # Environment-driven configuration
//! ├── skillsphere-db/      # DocumentStore trait, PostgreSQL and in-memory backends
//! └── skillsphere-auth/    # Bearer-token verification
//! src/
//! ├── middleware/          # Auth gate and the AuthUser extractor
//! ├── modules/             # Feature modules
//! │   ├── health/          # Banner, liveness and readiness
//! │   ├── courses/         # Course catalogue
//! │   └── enrollments/     # Student enrollments
//! ├── utils/               # Security and audit logging macros
//! └── validator.rs         # JSON body extractor with 400 rejections
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Documents and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Routes
//!
//! `GET /`, `GET /courses` and `GET /popular-courses` are public. Every other
//! course route and both enrollment routes require an
//! `Authorization: Bearer <token>` header.
//!
//! ## Documents
//!
//! Courses and enrollments are schema-free JSON documents held by a
//! [`skillsphere_db::DocumentStore`]. The store is opened once at startup,
//! shared through [`state::AppState`] and closed on shutdown.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

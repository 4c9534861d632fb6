//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - The per-visitor session (CSRF token, rate counters)
//! - Submission sanitizing and field validation
//! - Notification mail composition
//! - Repository / transport traits (interfaces)

pub mod mail;
pub mod repository;
pub mod session;
pub mod submission;
pub mod validation;

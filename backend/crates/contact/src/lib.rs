//! Contact Form Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session state, submission, validation, mail composition, traits
//! - `application/` - Use cases and configuration
//! - `infra/` - In-memory session store, sendmail transport
//! - `presentation/` - HTTP handlers, DTOs, JSON/HTML rendering
//!
//! ## Request Pipeline
//! POST /contact runs method → rate limit → CSRF → honeypot → validation →
//! delivery → commit. The first failing gate answers the request; session
//! state (rate counter, CSRF token) only changes on commit.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ContactConfig, MailMode};
pub use domain::repository::{MailError, MailTransport, SessionStore};
pub use error::{ContactError, ContactResult};
pub use infra::memory::InMemorySessionStore;
pub use infra::sendmail::SendmailTransport;
pub use presentation::router::contact_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

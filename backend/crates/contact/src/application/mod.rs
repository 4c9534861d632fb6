//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod issue_token;
pub mod session_token;
pub mod submit_contact;

pub use issue_token::{IssueTokenOutput, IssueTokenUseCase};
pub use submit_contact::{SubmitContactInput, SubmitContactOutput, SubmitContactUseCase};

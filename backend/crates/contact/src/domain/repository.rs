//! Repository and Transport Traits
//!
//! Interfaces for session persistence and mail delivery.
//! Implementations live in the infrastructure layer.

use kernel::id::SessionId;
use std::fmt;

use crate::domain::mail::OutgoingMail;
use crate::domain::session::ContactSession;
use crate::error::ContactResult;

/// Session store trait
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Load a session by ID
    async fn get(&self, id: SessionId) -> ContactResult<Option<ContactSession>>;

    /// Insert or replace a session (last write wins)
    async fn set(&self, id: SessionId, session: ContactSession) -> ContactResult<()>;

    /// Delete a session
    async fn remove(&self, id: SessionId) -> ContactResult<()>;

    /// Drop sessions not seen since `idle_before_secs`; returns how many were removed
    async fn sweep_idle(&self, idle_before_secs: i64) -> ContactResult<usize>;
}

/// Mail transport trait
#[trait_variant::make(MailTransport: Send)]
pub trait LocalMailTransport {
    /// Deliver one message
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Delivery failure, with whatever diagnostic the transport produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MailError {
    pub warning: Option<String>,
}

impl MailError {
    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            warning: Some(warning.into()),
        }
    }
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.warning {
            Some(warning) => write!(f, "mail not delivered: {}", warning),
            None => write!(f, "mail not delivered"),
        }
    }
}

impl std::error::Error for MailError {}

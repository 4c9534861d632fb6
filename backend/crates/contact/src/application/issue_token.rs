//! Issue CSRF Token Use Case
//!
//! Serves the page renderer: makes sure the visitor has a session and a
//! token to embed in the form. The token stays the same across reloads
//! until a successful submission rotates it.

use kernel::id::SessionId;
use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::domain::session::{ContactSession, CsrfToken};
use crate::error::ContactResult;

/// Output DTO for issue token
#[derive(Debug, Clone)]
pub struct IssueTokenOutput {
    pub session_id: SessionId,
    pub csrf_token: CsrfToken,
    /// Whether a new session was started (the cookie must be set)
    pub new_session: bool,
}

/// Issue CSRF Token Use Case
pub struct IssueTokenUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> IssueTokenUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    pub async fn execute(
        &self,
        session_id: Option<SessionId>,
        now_secs: i64,
    ) -> ContactResult<IssueTokenOutput> {
        let existing = match session_id {
            Some(id) => self.session_store.get(id).await?.map(|s| (id, s)),
            None => None,
        };

        let new_session = existing.is_none();
        let (session_id, mut session) =
            existing.unwrap_or_else(|| (SessionId::new(), ContactSession::new(now_secs)));

        let csrf_token = session.ensure_csrf_token();
        session.touch(now_secs);
        self.session_store.set(session_id, session).await?;

        if new_session {
            tracing::debug!(session_id = %session_id, "Started contact session");
        }

        Ok(IssueTokenOutput {
            session_id,
            csrf_token,
            new_session,
        })
    }
}

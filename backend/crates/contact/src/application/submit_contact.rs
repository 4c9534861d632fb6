//! Submit Contact Use Case
//!
//! Runs one POSTed form through the gates in order:
//! rate limit → CSRF → honeypot → validation → delivery → commit.
//! The first failing gate ends the request. Session state only changes
//! on the commit step.

use kernel::id::SessionId;
use std::sync::Arc;

use crate::application::config::ContactConfig;
use crate::domain::mail::OutgoingMail;
use crate::domain::repository::{MailTransport, SessionStore};
use crate::domain::session::CsrfToken;
use crate::domain::submission::ContactSubmission;
use crate::domain::validation::validate;
use crate::error::{ContactError, ContactResult};

/// Input DTO for submit contact
#[derive(Debug, Clone)]
pub struct SubmitContactInput {
    /// Verified session ID from the cookie, if any
    pub session_id: Option<SessionId>,
    pub submission: ContactSubmission,
    pub client_ip: String,
    /// Hostname the request was addressed to
    pub host: Option<String>,
    pub now_secs: i64,
}

/// Output DTO for submit contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitContactOutput {
    /// Mail sent (or simulated) and the session committed
    Sent { csrf_token: CsrfToken },
    /// Honeypot filled; answered as success, nothing else happened
    Discarded,
}

/// Submit Contact Use Case
pub struct SubmitContactUseCase<S, M>
where
    S: SessionStore,
    M: MailTransport,
{
    session_store: Arc<S>,
    mail_transport: Arc<M>,
    config: Arc<ContactConfig>,
}

impl<S, M> SubmitContactUseCase<S, M>
where
    S: SessionStore,
    M: MailTransport,
{
    pub fn new(session_store: Arc<S>, mail_transport: Arc<M>, config: Arc<ContactConfig>) -> Self {
        Self {
            session_store,
            mail_transport,
            config,
        }
    }

    pub async fn execute(&self, input: SubmitContactInput) -> ContactResult<SubmitContactOutput> {
        let stored = match input.session_id {
            Some(id) => self
                .session_store
                .get(id)
                .await?
                .map(|session| (id, session)),
            None => None,
        };

        // Rate limit
        let rate = stored
            .as_ref()
            .map(|(_, session)| session.rate_for(&input.client_ip))
            .unwrap_or_default();
        if rate.is_limited(&self.config.rate_limit, input.now_secs) {
            return Err(ContactError::RateLimited {
                retry_after_secs: rate.retry_after_secs(&self.config.rate_limit, input.now_secs),
            });
        }

        // CSRF
        let (session_id, mut session) = stored
            .filter(|(_, session)| session.csrf_matches(&input.submission.csrf_token))
            .ok_or(ContactError::SecurityCheckFailed)?;

        // Honeypot
        if input.submission.is_bot() {
            tracing::info!(client_ip = %input.client_ip, "Honeypot filled, submission discarded");
            return Ok(SubmitContactOutput::Discarded);
        }

        // Validation
        let clean = input.submission.sanitize();
        validate(&clean).map_err(ContactError::ValidationFailed)?;

        // Delivery
        let mail = OutgoingMail::notification(
            &clean,
            &input.client_ip,
            &self.config.operator_email,
            &self.config.from_email,
        );
        self.deliver(&mail, input.host.as_deref()).await?;

        // Commit
        session.record_submission(&input.client_ip, input.now_secs);
        session.touch(input.now_secs);
        let csrf_token = session.rotate_csrf_token();
        self.session_store.set(session_id, session).await?;

        tracing::info!(
            session_id = %session_id,
            client_ip = %input.client_ip,
            "Contact submission delivered"
        );

        Ok(SubmitContactOutput::Sent { csrf_token })
    }

    async fn deliver(&self, mail: &OutgoingMail, host: Option<&str>) -> ContactResult<()> {
        if self.config.simulates_delivery(host) {
            tracing::info!(
                to = %mail.to,
                subject = %mail.subject,
                reply_to = %mail.reply_to,
                "[DEV] Simulated email send"
            );
            return Ok(());
        }

        self.mail_transport.send(mail).await.map_err(|err| {
            if let Some(warning) = &err.warning {
                tracing::error!(warning = %warning, "Mail transport warning");
            }
            ContactError::DeliveryFailed
        })
    }
}

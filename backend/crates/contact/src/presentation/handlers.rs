//! HTTP Handlers

use crate::application::config::ContactConfig;
use crate::application::issue_token::IssueTokenUseCase;
use crate::application::session_token::{sign_session_id, verify_session_token};
use crate::application::submit_contact::{
    SubmitContactInput, SubmitContactOutput, SubmitContactUseCase,
};
use crate::domain::repository::{MailTransport, SessionStore};
use crate::error::ContactError;
use crate::presentation::dto::{ContactResponse, CsrfTokenResponse};
use crate::presentation::extract::ContactFormBody;
use crate::presentation::response::ContactReply;
use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use kernel::id::SessionId;
use platform::client::{ResponseFormat, detect_response_format, extract_client_ip, request_host};
use platform::cookie::extract_cookie;
use std::net::SocketAddr;
use std::sync::Arc;

const UNKNOWN_IP: &str = "unknown";

/// Shared state for contact handlers
pub struct ContactAppState<S, M>
where
    S: SessionStore + Sync + 'static,
    M: MailTransport + Sync + 'static,
{
    pub store: Arc<S>,
    pub mailer: Arc<M>,
    pub config: Arc<ContactConfig>,
}

impl<S, M> Clone for ContactAppState<S, M>
where
    S: SessionStore + Sync + 'static,
    M: MailTransport + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /contact
pub async fn submit_contact<S, M>(
    State(state): State<ContactAppState<S, M>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ContactFormBody(form): ContactFormBody,
) -> Response
where
    S: SessionStore + Sync + 'static,
    M: MailTransport + Sync + 'static,
{
    let format = detect_response_format(&headers);

    let client_ip = extract_client_ip(
        &headers,
        Some(addr.ip()),
        state.config.trust_forwarded_for,
    )
    .map(|ip| ip.to_string())
    .unwrap_or_else(|| UNKNOWN_IP.to_string());

    let input = SubmitContactInput {
        session_id: session_from_cookie(&headers, &state.config),
        submission: form.into(),
        client_ip,
        host: request_host(&headers),
        now_secs: chrono::Utc::now().timestamp(),
    };

    let use_case = SubmitContactUseCase::new(
        state.store.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.execute(input).await {
        Ok(SubmitContactOutput::Sent { csrf_token }) => {
            let message = match format {
                ResponseFormat::Json => "Thank you! Your message has been sent.",
                ResponseFormat::Html => "Your message has been sent successfully.",
            };
            let body = ContactResponse::success(message).with_csrf_token(csrf_token.as_str());
            ContactReply::success(format, body).into_response()
        }
        Ok(SubmitContactOutput::Discarded) => {
            let message = match format {
                ResponseFormat::Json => "Thanks!",
                ResponseFormat::Html => "Thanks for your message!",
            };
            ContactReply::success(format, ContactResponse::success(message)).into_response()
        }
        Err(err) => ContactReply::error(format, &err).into_response(),
    }
}

/// Any method other than POST on /contact
pub async fn method_not_allowed(headers: HeaderMap) -> Response {
    let format = detect_response_format(&headers);
    ContactReply::error(format, &ContactError::MethodNotAllowed).into_response()
}

/// GET /contact/csrf
pub async fn issue_csrf_token<S, M>(
    State(state): State<ContactAppState<S, M>>,
    headers: HeaderMap,
) -> Response
where
    S: SessionStore + Sync + 'static,
    M: MailTransport + Sync + 'static,
{
    let session_id = session_from_cookie(&headers, &state.config);
    let use_case = IssueTokenUseCase::new(state.store.clone());

    let output = match use_case
        .execute(session_id, chrono::Utc::now().timestamp())
        .await
    {
        Ok(output) => output,
        Err(err) => return ContactReply::error(ResponseFormat::Json, &err).into_response(),
    };

    // Re-sent on every fetch so Max-Age slides with activity
    let cookie = state
        .config
        .session_cookie()
        .to_set_cookie(&sign_session_id(&output.session_id, &state.config.session_secret));

    (
        [(header::SET_COOKIE, cookie), (header::CACHE_CONTROL, "no-store".to_string())],
        Json(CsrfTokenResponse {
            csrf_token: output.csrf_token.as_str().to_string(),
        }),
    )
        .into_response()
}

fn session_from_cookie(headers: &HeaderMap, config: &ContactConfig) -> Option<SessionId> {
    let token = extract_cookie(headers, &config.session_cookie_name)?;
    let session_id = verify_session_token(&token, &config.session_secret);
    if session_id.is_none() {
        tracing::debug!("Ignoring session cookie with bad signature");
    }
    session_id
}

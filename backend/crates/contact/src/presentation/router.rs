//! Contact Router

use crate::application::config::ContactConfig;
use crate::domain::repository::{MailTransport, SessionStore};
use crate::presentation::handlers::{self, ContactAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the contact router for any session store and mail transport.
///
/// Routes:
/// - `POST /contact` (every other method answers 405)
/// - `GET /contact/csrf`
pub fn contact_router<S, M>(store: S, mailer: M, config: ContactConfig) -> Router
where
    S: SessionStore + Sync + 'static,
    M: MailTransport + Sync + 'static,
{
    let state = ContactAppState {
        store: Arc::new(store),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/contact",
            post(handlers::submit_contact::<S, M>).fallback(handlers::method_not_allowed),
        )
        .route("/contact/csrf", get(handlers::issue_csrf_token::<S, M>))
        .with_state(state)
}

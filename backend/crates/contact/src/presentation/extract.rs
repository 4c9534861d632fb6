//! Request Body Extraction

use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header;
use std::convert::Infallible;

use crate::presentation::dto::ContactForm;

/// Contact form read from either `application/x-www-form-urlencoded` or
/// `multipart/form-data` (what a browser `FormData` upload sends).
///
/// Never rejects: an unreadable body yields an empty form, which then fails
/// the CSRF gate.
#[derive(Debug, Clone, Default)]
pub struct ContactFormBody(pub ContactForm);

impl<S> FromRequest<S> for ContactFormBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = if is_multipart(&req) {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Unreadable multipart contact form");
                    ContactForm::default()
                }
            }
        } else {
            match Form::<ContactForm>::from_request(req, state).await {
                Ok(Form(form)) => form,
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Unreadable contact form body");
                    ContactForm::default()
                }
            }
        };
        Ok(Self(form))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("multipart/form-data"))
}

/// Unknown parts are skipped. A malformed body discards everything read so far.
async fn read_multipart(mut multipart: Multipart) -> ContactForm {
    let mut form = ContactForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return form,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart contact form");
                return ContactForm::default();
            }
        };

        let slot = match field.name() {
            Some("name") => &mut form.name,
            Some("email") => &mut form.email,
            Some("phone") => &mut form.phone,
            Some("message") => &mut form.message,
            Some("website") => &mut form.website,
            Some("csrf_token") => &mut form.csrf_token,
            _ => continue,
        };

        match field.text().await {
            Ok(text) => *slot = text,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart contact form");
                return ContactForm::default();
            }
        }
    }
}

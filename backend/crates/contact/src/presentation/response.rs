//! Response Rendering
//!
//! Every outcome of POST /contact is rendered twice over: as a JSON body for
//! script callers, or as a small standalone HTML page for plain form posts.
//! Status codes are the same for both.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use platform::client::ResponseFormat;
use platform::html::escape_html;

use crate::error::ContactError;
use crate::presentation::dto::ContactResponse;

const BACK_LINK: &str = "/#contact";

/// A rendered outcome, ready to become a response
#[derive(Debug, Clone)]
pub struct ContactReply {
    pub status: StatusCode,
    pub format: ResponseFormat,
    /// HTML page heading
    pub title: &'static str,
    pub body: ContactResponse,
    pub retry_after_secs: Option<u64>,
}

impl ContactReply {
    pub fn success(format: ResponseFormat, body: ContactResponse) -> Self {
        Self {
            status: StatusCode::OK,
            format,
            title: "Thank you",
            body,
            retry_after_secs: None,
        }
    }

    /// Render a rejection; logs it on the way out
    pub fn error(format: ResponseFormat, err: &ContactError) -> Self {
        err.log();

        let mut body = ContactResponse::failure(err.user_message(format));
        if let Some(errors) = err.field_errors() {
            body = body.with_errors(errors.clone());
        }

        let retry_after_secs = match err {
            ContactError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        Self {
            status: err.status_code(),
            format,
            title: err.title(),
            body,
            retry_after_secs,
        }
    }
}

impl IntoResponse for ContactReply {
    fn into_response(self) -> Response {
        let mut response = match self.format {
            ResponseFormat::Json => (self.status, Json(self.body)).into_response(),
            ResponseFormat::Html => {
                let page = render_page(self.title, &self.body.message);
                (self.status, Html(page)).into_response()
            }
        };

        if let Some(secs) = self.retry_after_secs {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Standalone status page for non-script form posts
pub fn render_page(title: &str, message: &str) -> String {
    let title = escape_html(title);
    let message = escape_html(message);
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="robots" content="noindex">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 36rem; margin: 4rem auto; padding: 0 1rem; line-height: 1.5; }}
a {{ color: inherit; }}
</style>
</head>
<body>
<main>
<h1>{title}</h1>
<p>{message}</p>
<p><a href="{BACK_LINK}">Zurück</a></p>
</main>
</body>
</html>
"#
    )
}

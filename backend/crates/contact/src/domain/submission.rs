//! Contact Submission
//!
//! Raw form input and its sanitized counterpart.

use platform::html::escape_html;

/// One form post, exactly as received
#[derive(Debug, Clone, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub csrf_token: String,
    /// Hidden field; humans leave it empty
    pub honeypot: String,
}

impl ContactSubmission {
    /// Any honeypot content at all marks the post as automated
    pub fn is_bot(&self) -> bool {
        !self.honeypot.is_empty()
    }

    /// Trimmed, HTML-escaped copies of the visitor fields
    pub fn sanitize(&self) -> SanitizedSubmission {
        SanitizedSubmission {
            name: sanitize(&self.name),
            email: sanitize(&self.email),
            phone: sanitize(&self.phone),
            message: sanitize(&self.message),
        }
    }
}

/// Visitor fields after trimming and HTML escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

fn sanitize(value: &str) -> String {
    escape_html(value.trim())
}

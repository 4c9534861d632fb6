//! Notification Mail
//!
//! Composes the plain-text message sent to the site operator.

use crate::domain::submission::SanitizedSubmission;

const MAILER: &str = concat!("contact/", env!("CARGO_PKG_VERSION"));

/// A message ready for a [`MailTransport`](crate::domain::repository::MailTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    /// Extra headers, in send order
    pub headers: Vec<(String, String)>,
}

impl OutgoingMail {
    /// Build the operator notification for one validated submission.
    ///
    /// CR and LF are removed from every value that lands in a header.
    pub fn notification(
        submission: &SanitizedSubmission,
        client_ip: &str,
        to: &str,
        from: &str,
    ) -> Self {
        let name_safe = strip_line_breaks(&submission.name);
        let email_safe = strip_line_breaks(&submission.email);

        let body = format!(
            "This is a contact request from the website.\n\n\
             Form Data:\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             IP: {}\n\n\
             Message:\n{}\n",
            submission.name, submission.email, submission.phone, client_ip, submission.message
        );

        Self {
            to: strip_line_breaks(to),
            from: strip_line_breaks(from),
            reply_to: email_safe,
            subject: format!("Website Contact - {}", name_safe),
            body,
            headers: vec![
                ("X-Mailer".to_string(), MAILER.to_string()),
                (
                    "Content-Type".to_string(),
                    "text/plain; charset=UTF-8".to_string(),
                ),
                ("Content-Transfer-Encoding".to_string(), "8bit".to_string()),
                ("MIME-Version".to_string(), "1.0".to_string()),
                ("X-Priority".to_string(), "3".to_string()),
            ],
        }
    }

    /// Full RFC 5322 message with CRLF line endings, as piped to `sendmail -t`
    pub fn to_rfc5322(&self) -> String {
        let mut message = String::new();
        message.push_str(&format!("To: {}\r\n", self.to));
        message.push_str(&format!("From: {}\r\n", self.from));
        message.push_str(&format!("Reply-To: {}\r\n", self.reply_to));
        message.push_str(&format!("Subject: {}\r\n", self.subject));
        for (name, value) in &self.headers {
            message.push_str(&format!("{}: {}\r\n", name, value));
        }
        message.push_str("\r\n");
        message.push_str(&self.body.replace('\n', "\r\n"));
        message
    }
}

/// Remove CR and LF so a value cannot start a new header line
pub fn strip_line_breaks(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

//! Field Validation
//!
//! Checks run on sanitized (trimmed, HTML-escaped) submissions.
//! Every field is checked; violations are collected, not short-circuited.
//!
//! ## Rules
//! - name: at least 2 characters
//! - email: `local@domain` with a dotted, hostname-shaped domain
//! - phone: optional; `^\+?[-0-9\s()]{10,}$` when present
//! - message: at least 10 characters

use serde::Serialize;

use crate::domain::submission::SanitizedSubmission;

// ============================================================================
// Constants
// ============================================================================

pub const NAME_MIN_LENGTH: usize = 2;
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const PHONE_MIN_LENGTH: usize = 10;

/// Maximum address length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;
const DOMAIN_LABEL_MAX_LENGTH: usize = 63;

/// Printable characters allowed in an unquoted local part besides alphanumerics
const LOCAL_PART_SPECIALS: &[char] = &[
    '!', '#', '$', '%', '&', '\'', '*', '+', '/', '=', '?', '^', '_', '`', '{', '|', '}', '~',
    '-', '.',
];

pub const NAME_ERROR: &str = "Please enter your name (min 2 characters).";
pub const EMAIL_ERROR: &str = "Please enter a valid email address.";
pub const PHONE_ERROR: &str = "Please enter a valid phone number.";
pub const MESSAGE_ERROR: &str = "Please enter a longer message (min 10 characters).";

// ============================================================================
// ValidationErrors
// ============================================================================

/// Field-level validation failures; only violated fields are serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of violated fields
    pub fn len(&self) -> usize {
        [self.name, self.email, self.phone, self.message]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }

    /// Names of the violated fields, in form order
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        if self.phone.is_some() {
            fields.push("phone");
        }
        if self.message.is_some() {
            fields.push("message");
        }
        fields
    }
}

/// Validate all fields at once
pub fn validate(submission: &SanitizedSubmission) -> Result<(), ValidationErrors> {
    let errors = ValidationErrors {
        name: (!is_valid_name(&submission.name)).then_some(NAME_ERROR),
        email: (!is_valid_email(&submission.email)).then_some(EMAIL_ERROR),
        phone: (!is_valid_phone(&submission.phone)).then_some(PHONE_ERROR),
        message: (!is_valid_message(&submission.message)).then_some(MESSAGE_ERROR),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= NAME_MIN_LENGTH
}

pub fn is_valid_message(message: &str) -> bool {
    message.chars().count() >= MESSAGE_MIN_LENGTH
}

/// Empty is valid: the phone field is optional
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return true;
    }

    let digits_part = phone.strip_prefix('+').unwrap_or(phone);

    digits_part.chars().count() >= PHONE_MIN_LENGTH
        && digits_part.chars().all(|c| {
            c.is_ascii_digit()
                || matches!(c, '-' | '(' | ')' | ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
        })
}

/// Unquoted `local@domain` addresses with a hostname domain
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LENGTH {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(&c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= DOMAIN_LABEL_MAX_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, phone: &str, message: &str) -> SanitizedSubmission {
        SanitizedSubmission {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let s = submission(
            "Ada",
            "ada@example.com",
            "+49 176 4553-1533",
            "Hello, I would like a quote.",
        );
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let s = submission("A", "not-an-email", "123", "short");
        let errors = validate(&s).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.fields(), vec!["name", "email", "phone", "message"]);
        assert_eq!(errors.name, Some(NAME_ERROR));
        assert_eq!(errors.email, Some(EMAIL_ERROR));
        assert_eq!(errors.phone, Some(PHONE_ERROR));
        assert_eq!(errors.message, Some(MESSAGE_ERROR));
    }

    #[test]
    fn test_errors_serialize_only_violations() {
        let s = submission("Ada", "bad", "", "long enough message");
        let errors = validate(&s).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json, serde_json::json!({ "email": EMAIL_ERROR }));
    }

    #[test]
    fn test_name_counts_characters() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("A"));
        assert!(is_valid_name("Al"));
        assert!(is_valid_name("Jö"));
    }

    #[test]
    fn test_message_length() {
        assert!(!is_valid_message("123456789"));
        assert!(is_valid_message("1234567890"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("0176 4553153"));
        assert!(is_valid_phone("+49 (176) 45531533"));
        assert!(is_valid_phone("089-123-4567"));

        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("+123456789"));
        assert!(!is_valid_phone("0176 ABC 5315"));
        assert!(!is_valid_phone("++49 176 45531533"));
        assert!(!is_valid_phone("49+176 45531533"));
    }

    #[test]
    fn test_email_valid() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name+tag@sub.example.co.uk"));
        assert!(is_valid_email("x@a-b.de"));
    }

    #[test]
    fn test_email_invalid() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("us..er@example.com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_email_after_escaping_is_rejected() {
        // `'` becomes `&#039;`, and `;` is not allowed in a local part.
        assert!(!is_valid_email("o&#039;brien@example.com"));
    }
}

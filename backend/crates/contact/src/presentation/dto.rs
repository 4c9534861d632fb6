//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::submission::ContactSubmission;
use crate::domain::validation::ValidationErrors;

/// Form body of POST /contact (urlencoded or multipart).
///
/// Every field is optional on the wire; a missing field reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl From<ContactForm> for ContactSubmission {
    fn from(form: ContactForm) -> Self {
        ContactSubmission {
            name: form.name,
            email: form.email,
            phone: form.phone,
            message: form.message,
            csrf_token: form.csrf_token,
            honeypot: form.website,
        }
    }
}

/// JSON body returned to script callers of POST /contact
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl ContactResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            csrf_token: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Response for GET /contact/csrf
#[derive(Debug, Clone, Serialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::PHONE_ERROR;

    #[test]
    fn test_form_maps_honeypot() {
        let form = ContactForm {
            website: "http://spam".to_string(),
            csrf_token: "abc".to_string(),
            ..Default::default()
        };
        let submission: ContactSubmission = form.into();
        assert_eq!(submission.honeypot, "http://spam");
        assert_eq!(submission.csrf_token, "abc");
        assert!(submission.is_bot());
    }

    #[test]
    fn test_success_json_shape() {
        let body = ContactResponse::success("Thank you! Your message has been sent.")
            .with_csrf_token("ff00");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "success": true,
                "message": "Thank you! Your message has been sent.",
                "csrf_token": "ff00"
            })
        );
    }

    #[test]
    fn test_failure_json_omits_empty_parts() {
        let value = serde_json::to_value(ContactResponse::failure("nope")).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "message": "nope"}));
    }

    #[test]
    fn test_failure_json_with_errors() {
        let errors = ValidationErrors {
            phone: Some(PHONE_ERROR),
            ..Default::default()
        };
        let value =
            serde_json::to_value(ContactResponse::failure("fix it").with_errors(errors)).unwrap();
        assert_eq!(value["errors"], serde_json::json!({"phone": PHONE_ERROR}));
    }
}

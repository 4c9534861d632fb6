//! Visitor Session
//!
//! Everything the contact form remembers about one browser session.

use platform::crypto::{constant_time_eq, random_hex};
use platform::rate_limit::RateState;
use std::collections::HashMap;
use std::fmt;

/// Random bytes per CSRF token (256 bits)
pub const CSRF_TOKEN_BYTES: usize = 32;

/// Anti-forgery token, hex-encoded
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Fresh 256-bit token from the OS RNG
    pub fn generate() -> Self {
        Self(random_hex(CSRF_TOKEN_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a submitted value
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

// Tokens are secrets; keep them out of debug logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

/// Server-side state of one browser session
#[derive(Debug, Clone, Default)]
pub struct ContactSession {
    pub csrf_token: Option<CsrfToken>,
    /// Limiter state keyed by client IP
    pub rate: HashMap<String, RateState>,
    /// Unix seconds of the last request that touched the session
    pub last_seen_secs: i64,
}

impl ContactSession {
    pub fn new(now_secs: i64) -> Self {
        Self {
            last_seen_secs: now_secs,
            ..Default::default()
        }
    }

    /// Limiter state for `ip`, `{0, 0}` if the IP has not submitted yet
    pub fn rate_for(&self, ip: &str) -> RateState {
        self.rate.get(ip).copied().unwrap_or_default()
    }

    /// Whether `submitted` equals the stored token. No stored token never matches.
    pub fn csrf_matches(&self, submitted: &str) -> bool {
        self.csrf_token
            .as_ref()
            .is_some_and(|token| token.matches(submitted))
    }

    /// Return the current token, issuing one if the session has none
    pub fn ensure_csrf_token(&mut self) -> CsrfToken {
        self.csrf_token.get_or_insert_with(CsrfToken::generate).clone()
    }

    /// Replace the token and return the new one
    pub fn rotate_csrf_token(&mut self) -> CsrfToken {
        let token = CsrfToken::generate();
        self.csrf_token = Some(token.clone());
        token
    }

    /// Count one accepted submission from `ip` at `now_secs`
    pub fn record_submission(&mut self, ip: &str, now_secs: i64) {
        let next = self.rate_for(ip).recorded(now_secs);
        self.rate.insert(ip.to_string(), next);
    }

    pub fn touch(&mut self, now_secs: i64) {
        self.last_seen_secs = now_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = CsrfToken::generate();
        assert_eq!(token.as_str().len(), CSRF_TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = CsrfToken::generate();
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }

    #[test]
    fn test_csrf_without_token_never_matches() {
        let session = ContactSession::new(0);
        assert!(!session.csrf_matches(""));
        assert!(!session.csrf_matches("anything"));
    }

    #[test]
    fn test_ensure_is_stable_rotate_changes() {
        let mut session = ContactSession::new(0);
        let first = session.ensure_csrf_token();
        assert_eq!(session.ensure_csrf_token(), first);
        assert!(session.csrf_matches(first.as_str()));

        let rotated = session.rotate_csrf_token();
        assert_ne!(rotated, first);
        assert!(!session.csrf_matches(first.as_str()));
        assert!(session.csrf_matches(rotated.as_str()));
    }

    #[test]
    fn test_rate_is_per_ip() {
        let mut session = ContactSession::new(0);
        session.record_submission("192.0.2.1", 100);
        session.record_submission("192.0.2.1", 101);

        assert_eq!(session.rate_for("192.0.2.1").count, 2);
        assert_eq!(session.rate_for("192.0.2.1").last_submit_secs, 101);
        assert_eq!(session.rate_for("198.51.100.7"), RateState::default());
    }
}

//! Application Configuration
//!
//! Configuration for the contact application layer.

use std::str::FromStr;
use std::time::Duration;

use platform::cookie::CookieSpec;
use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// How notifications leave the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailMode {
    /// Simulate on local hosts, send everywhere else
    ///
    /// The host is `ContactConfig::server_name` when set. Otherwise it is the
    /// request's Host header, which the client controls.
    #[default]
    Auto,
    /// Always simulate (log only)
    Simulate,
    /// Always hand the message to the transport
    Live,
}

impl FromStr for MailMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(MailMode::Auto),
            "simulate" | "dev" => Ok(MailMode::Simulate),
            "live" | "sendmail" => Ok(MailMode::Live),
            other => Err(format!("unknown mail mode: {other}")),
        }
    }
}

/// Contact application configuration
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Operator address that receives notifications
    pub operator_email: String,
    /// Envelope sender
    pub from_email: String,
    /// Cooldown policy (3 submissions / 60 s)
    pub rate_limit: RateLimitConfig,
    /// Notification delivery mode
    pub mail_mode: MailMode,
    /// Hostnames treated as a development machine in `MailMode::Auto`
    pub local_hosts: Vec<String>,
    /// Name this server is deployed under; overrides the Host header in `MailMode::Auto`
    pub server_name: Option<String>,
    /// Use the first X-Forwarded-For hop as client IP
    pub trust_forwarded_for: bool,
    /// Cookie name for session
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Idle lifetime of a session
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            operator_email: "info@ame.velletti.de".to_string(),
            from_email: "server@ame.velletti.de".to_string(),
            rate_limit: RateLimitConfig::default(),
            mail_mode: MailMode::Auto,
            local_hosts: vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                "::1".to_string(),
            ],
            server_name: None,
            trust_forwarded_for: false,
            session_cookie_name: "contact_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl ContactConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, simulated mail)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            mail_mode: MailMode::Simulate,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Whether a request for `host` should only simulate delivery
    pub fn simulates_delivery(&self, host: Option<&str>) -> bool {
        match self.mail_mode {
            MailMode::Simulate => true,
            MailMode::Live => false,
            MailMode::Auto => self.server_name.as_deref().or(host).is_some_and(|h| {
                self.local_hosts
                    .iter()
                    .any(|local| local.eq_ignore_ascii_case(h))
            }),
        }
    }

    /// Attributes of the session cookie
    pub fn session_cookie(&self) -> CookieSpec {
        CookieSpec {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_ttl.as_secs()),
            ..CookieSpec::new(self.session_cookie_name.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContactConfig::default();

        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.mail_mode, MailMode::Auto);
        assert_eq!(config.session_cookie_name, "contact_session");
        assert!(config.cookie_secure);
        assert!(!config.trust_forwarded_for);
    }

    #[test]
    fn test_with_random_secret() {
        let a = ContactConfig::with_random_secret();
        let b = ContactConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_development_config() {
        let config = ContactConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.mail_mode, MailMode::Simulate);
        assert!(config.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_simulates_delivery() {
        let mut config = ContactConfig::default();

        assert!(config.simulates_delivery(Some("localhost")));
        assert!(config.simulates_delivery(Some("::1")));
        assert!(!config.simulates_delivery(Some("ame.velletti.de")));
        assert!(!config.simulates_delivery(None));

        config.mail_mode = MailMode::Simulate;
        assert!(config.simulates_delivery(Some("ame.velletti.de")));

        config.mail_mode = MailMode::Live;
        assert!(!config.simulates_delivery(Some("localhost")));
    }

    #[test]
    fn test_server_name_overrides_request_host() {
        let config = ContactConfig {
            server_name: Some("ame.velletti.de".to_string()),
            ..ContactConfig::default()
        };
        assert!(!config.simulates_delivery(Some("localhost")));
        assert!(!config.simulates_delivery(None));

        let config = ContactConfig {
            server_name: Some("localhost".to_string()),
            ..ContactConfig::default()
        };
        assert!(config.simulates_delivery(Some("ame.velletti.de")));
    }

    #[test]
    fn test_session_ttl_secs_saturates() {
        let config = ContactConfig {
            session_ttl: Duration::from_secs(u64::MAX),
            ..ContactConfig::default()
        };
        assert_eq!(config.session_ttl_secs(), i64::MAX);
        assert_eq!(ContactConfig::default().session_ttl_secs(), 86_400);
    }

    #[test]
    fn test_mail_mode_parse() {
        assert_eq!("auto".parse::<MailMode>(), Ok(MailMode::Auto));
        assert_eq!("Simulate".parse::<MailMode>(), Ok(MailMode::Simulate));
        assert_eq!("sendmail".parse::<MailMode>(), Ok(MailMode::Live));
        assert!("smtp".parse::<MailMode>().is_err());
    }

    #[test]
    fn test_session_cookie_spec() {
        let config = ContactConfig::development();
        let cookie = config.session_cookie().to_set_cookie("v");
        assert!(cookie.starts_with("contact_session=v"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }
}

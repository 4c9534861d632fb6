//! Server configuration loaded from environment variables.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose;
use contact::{ContactConfig, MailMode};
use contact::application::config::SameSite;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:8000,http://127.0.0.1:8000";
const DEFAULT_SENDMAIL_PATH: &str = "/usr/sbin/sendmail";
/// One year
const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 3600;

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub contact: ContactConfig,
    pub sendmail_path: PathBuf,
    pub frontend_origins: Vec<String>,
    /// How often idle sessions are swept
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = optional_env("CONTACT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("CONTACT_BIND_ADDR must be a socket address like 0.0.0.0:31113")?;

        let mut contact = if cfg!(debug_assertions) {
            ContactConfig::development()
        } else {
            ContactConfig::default()
        };

        match optional_env("CONTACT_SESSION_SECRET") {
            Some(secret_b64) => contact.session_secret = decode_secret(&secret_b64)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("CONTACT_SESSION_SECRET not set, using a random secret");
            }
            None => bail!("CONTACT_SESSION_SECRET must be set in production"),
        }

        if let Some(email) = optional_env("CONTACT_OPERATOR_EMAIL") {
            contact.operator_email = email;
        }
        if let Some(email) = optional_env("CONTACT_FROM_EMAIL") {
            contact.from_email = email;
        }
        if let Some(mode) = optional_env("CONTACT_MAIL_MODE") {
            contact.mail_mode = mode
                .parse::<MailMode>()
                .map_err(anyhow::Error::msg)
                .context("CONTACT_MAIL_MODE must be auto, simulate or sendmail")?;
        }
        if let Some(flag) = optional_env("CONTACT_TRUST_FORWARDED_FOR") {
            contact.trust_forwarded_for = parse_bool(&flag)
                .context("CONTACT_TRUST_FORWARDED_FOR must be true or false")?;
        }
        if let Some(flag) = optional_env("CONTACT_COOKIE_SECURE") {
            contact.cookie_secure =
                parse_bool(&flag).context("CONTACT_COOKIE_SECURE must be true or false")?;
        }
        if let Some(policy) = optional_env("CONTACT_COOKIE_SAMESITE") {
            contact.cookie_same_site = SameSite::parse(&policy).with_context(|| {
                format!("CONTACT_COOKIE_SAMESITE must be Strict, Lax or None, got {policy}")
            })?;
        }
        if let Some(ttl) = optional_env("CONTACT_SESSION_TTL_SECS") {
            contact.session_ttl = parse_session_ttl(&ttl)?;
        }
        if let Some(name) = optional_env("CONTACT_SERVER_NAME") {
            contact.server_name = Some(name.trim().to_string());
        }
        if contact.mail_mode == MailMode::Auto && contact.server_name.is_none() {
            tracing::warn!(
                "CONTACT_MAIL_MODE is auto without CONTACT_SERVER_NAME, the request Host header decides whether mail is sent"
            );
        }

        let sendmail_path = optional_env("CONTACT_SENDMAIL_PATH")
            .unwrap_or_else(|| DEFAULT_SENDMAIL_PATH.to_string())
            .into();

        let frontend_origins = optional_env("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        // Sweep a few times per TTL, but not more than once a minute
        let sweep_interval = Duration::from_secs((contact.session_ttl.as_secs() / 4).max(60));

        Ok(Config {
            bind_addr,
            contact,
            sendmail_path,
            frontend_origins,
            sweep_interval,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn decode_secret(secret_b64: &str) -> Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("CONTACT_SESSION_SECRET must be base64")?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!(
            "CONTACT_SESSION_SECRET must decode to 32 bytes, got {}",
            bytes.len()
        )
    })
}

fn parse_session_ttl(value: &str) -> Result<Duration> {
    let secs = value
        .trim()
        .parse::<u64>()
        .context("CONTACT_SESSION_TTL_SECS must be a number of seconds")?;
    if secs == 0 || secs > MAX_SESSION_TTL_SECS {
        bail!("CONTACT_SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}, got {secs}");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

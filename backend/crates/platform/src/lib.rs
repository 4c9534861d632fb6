//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, HMAC-SHA256, Base64, constant-time compare)
//! - Cookie management
//! - Client identification (IP, host, response format)
//! - HTML escaping
//! - Rate limiting policy

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod html;
pub mod rate_limit;

//! Signed Session Token
//!
//! The session cookie carries `base64(session_id || HMAC-SHA256(secret, session_id))`.

use kernel::id::SessionId;
use platform::crypto::{constant_time_eq, from_base64, hmac_sha256, to_base64};

const ID_LEN: usize = 16;
const MAC_LEN: usize = 32;

/// Create a signed session token
pub fn sign_session_id(id: &SessionId, secret: &[u8; 32]) -> String {
    let id_bytes = id.as_bytes();
    let signature = hmac_sha256(secret, id_bytes);
    let mut token_data = Vec::with_capacity(ID_LEN + MAC_LEN);
    token_data.extend_from_slice(id_bytes);
    token_data.extend_from_slice(&signature);
    to_base64(&token_data)
}

/// Verify and extract the session ID from a signed token
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<SessionId> {
    let token_data = from_base64(token).ok()?;
    if token_data.len() != ID_LEN + MAC_LEN {
        return None;
    }

    let id_bytes: [u8; ID_LEN] = token_data[..ID_LEN].try_into().ok()?;
    let expected_signature = hmac_sha256(secret, &id_bytes);

    if !constant_time_eq(&token_data[ID_LEN..], &expected_signature) {
        return None;
    }

    Some(SessionId::from_bytes(id_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [9u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let id = SessionId::new();
        let token = sign_session_id(&id, &SECRET);
        assert_eq!(verify_session_token(&token, &SECRET), Some(id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_id(&SessionId::new(), &SECRET);
        assert_eq!(verify_session_token(&token, &[1u8; 32]), None);
    }

    #[test]
    fn test_tampered_id_rejected() {
        let id = SessionId::new();
        let mut raw = from_base64(&sign_session_id(&id, &SECRET)).unwrap();
        raw[0] ^= 0x01;
        assert_eq!(verify_session_token(&to_base64(&raw), &SECRET), None);
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(verify_session_token("", &SECRET), None);
        assert_eq!(verify_session_token("not base64!", &SECRET), None);
        assert_eq!(verify_session_token(&to_base64(&[0u8; 16]), &SECRET), None);
    }
}

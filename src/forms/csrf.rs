//! Signed anti-forgery tokens carried in a hidden field of every form.
//!
//! A token is `<nonce>.<expires>.<hex hmac-sha256>`, signed with the
//! configured secret key. Nothing is stored server-side.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::Serialize;
use sha2::Sha256;

use super::FieldErrors;
use crate::config::Config;
use crate::error::{AppError, AppResult};

pub const FIELD_NAME: &str = "csrf_token";
pub const MISSING_MESSAGE: &str = "The CSRF token is missing.";
pub const INVALID_MESSAGE: &str = "The CSRF token is invalid.";
pub const EXPIRED_MESSAGE: &str = "The CSRF token has expired.";

type HmacSha256 = Hmac<Sha256>;

/// Issue a token that expires `lifetime_secs` after `now`.
pub fn issue_at(secret: &str, now: i64, lifetime_secs: i64) -> AppResult<String> {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill(&mut nonce);
    let payload = format!("{}.{}", hex::encode(nonce), now + lifetime_secs);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(payload.as_bytes());

    Ok(format!("{}.{}", payload, hex::encode(mac.finalize().into_bytes())))
}

/// Check a submitted token, returning the message to show when it fails.
pub fn verify_at(secret: &str, token: &str, now: i64) -> Result<(), &'static str> {
    if token.is_empty() {
        return Err(MISSING_MESSAGE);
    }

    let (payload, signature) = token.rsplit_once('.').ok_or(INVALID_MESSAGE)?;
    let (_, expires) = payload.split_once('.').ok_or(INVALID_MESSAGE)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| INVALID_MESSAGE)?;
    mac.update(payload.as_bytes());

    // verify_slice compares in constant time
    let sig_bytes = hex::decode(signature).map_err(|_| INVALID_MESSAGE)?;
    mac.verify_slice(&sig_bytes).map_err(|_| INVALID_MESSAGE)?;

    let expires: i64 = expires.parse().map_err(|_| INVALID_MESSAGE)?;
    if now > expires {
        return Err(EXPIRED_MESSAGE);
    }

    Ok(())
}

pub fn issue(config: &Config) -> AppResult<String> {
    issue_at(&config.secret_key, chrono::Utc::now().timestamp(), config.csrf_time_limit_secs)
}

pub fn verify(config: &Config, token: &str) -> Result<(), &'static str> {
    verify_at(&config.secret_key, token, chrono::Utc::now().timestamp())
}

/// Hidden token input plus any error it produced, as the templates draw it.
#[derive(Debug, Clone, Serialize)]
pub struct CsrfField {
    pub name: &'static str,
    pub token: String,
    pub errors: Vec<String>,
}

impl CsrfField {
    /// Fresh token for the next submission of a rendered form.
    pub fn issue(config: &Config, errors: &FieldErrors) -> AppResult<Self> {
        Ok(Self {
            name: FIELD_NAME,
            token: issue(config)?,
            errors: errors.get(FIELD_NAME).cloned().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_issued_token_verifies() {
        let token = issue_at(SECRET, NOW, 3600).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(verify_at(SECRET, &token, NOW), Ok(()));
        assert_eq!(verify_at(SECRET, &token, NOW + 3600), Ok(()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let first = issue_at(SECRET, NOW, 3600).unwrap();
        let second = issue_at(SECRET, NOW, 3600).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(verify_at(SECRET, "", NOW), Err(MISSING_MESSAGE));
    }

    #[test]
    fn test_expired_token() {
        let token = issue_at(SECRET, NOW, 60).unwrap();
        assert_eq!(verify_at(SECRET, &token, NOW + 61), Err(EXPIRED_MESSAGE));
    }

    #[test]
    fn test_wrong_secret_or_tampering_is_invalid() {
        let token = issue_at(SECRET, NOW, 3600).unwrap();
        assert_eq!(verify_at("another-key", &token, NOW), Err(INVALID_MESSAGE));

        // Pushing the expiry out breaks the signature
        let (nonce, rest) = token.split_once('.').unwrap();
        let (_, signature) = rest.split_once('.').unwrap();
        let forged = format!("{}.{}.{}", nonce, NOW + 999_999, signature);
        assert_eq!(verify_at(SECRET, &forged, NOW), Err(INVALID_MESSAGE));

        assert_eq!(verify_at(SECRET, "garbage", NOW), Err(INVALID_MESSAGE));
        assert_eq!(verify_at(SECRET, "a.b.zz", NOW), Err(INVALID_MESSAGE));
    }
}

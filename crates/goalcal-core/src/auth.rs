//! Password hashing and signed session tokens.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 with a random per-hash
//! salt and the iteration count embedded in the encoded string, so the
//! count can be raised later without invalidating old hashes. Session
//! tokens are `calendar_id:issued_at_millis:signature` (HMAC-SHA256,
//! hex) wrapped in base64. All comparisons are constant-time.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

const PBKDF2_SCHEME: &str = "pbkdf2-sha256";
const PBKDF2_ITERATIONS: u32 = 200_000;
const SALT_LEN: usize = 16;

/// Hash a password for storage.
///
/// Output format: `pbkdf2-sha256$<iterations>$<salt_b64>$<key_b64>`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{PBKDF2_SCHEME}${PBKDF2_ITERATIONS}${}${}",
        B64.encode(salt),
        B64.encode(key)
    )
}

/// Check a password against a stored hash.
///
/// Returns `Ok(false)` on a wrong password; `Err` only when the stored
/// hash itself is unreadable.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let mut parts = stored.split('$');
    let scheme = parts.next().ok_or(AuthError::InvalidPasswordHash)?;
    if scheme != PBKDF2_SCHEME {
        return Err(AuthError::InvalidPasswordHash);
    }
    let iterations: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|n| *n > 0)
        .ok_or(AuthError::InvalidPasswordHash)?;
    let salt = parts
        .next()
        .and_then(|s| B64.decode(s).ok())
        .ok_or(AuthError::InvalidPasswordHash)?;
    let expected = parts
        .next()
        .and_then(|s| B64.decode(s).ok())
        .ok_or(AuthError::InvalidPasswordHash)?;
    if parts.next().is_some() {
        return Err(AuthError::InvalidPasswordHash);
    }

    let key = derive_key(password, &salt, iterations);
    Ok(constant_time_eq(&key, &expected))
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Issues and verifies signed session tokens for one deployment.
#[derive(Debug, Clone)]
pub struct SessionKeeper {
    key: Vec<u8>,
    ttl: Duration,
}

impl SessionKeeper {
    /// Build a keeper from the deployment's session secret.
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            key: signing_key(secret),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token binding `calendar_id` to `now`.
    pub fn issue(&self, calendar_id: &str, now: DateTime<Utc>) -> String {
        let data = format!("{calendar_id}:{}", now.timestamp_millis());
        let signature = self.sign(&data);
        B64.encode(format!("{data}:{signature}"))
    }

    /// Verify a token and return the calendar id it was issued for.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let decoded = B64
            .decode(token.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(AuthError::TokenMalformed)?;

        let mut parts = decoded.splitn(3, ':');
        let calendar_id = parts.next().ok_or(AuthError::TokenMalformed)?;
        let issued_millis: i64 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(AuthError::TokenMalformed)?;
        let signature = parts.next().ok_or(AuthError::TokenMalformed)?;
        if calendar_id.is_empty() {
            return Err(AuthError::TokenMalformed);
        }

        let data = format!("{calendar_id}:{issued_millis}");
        let expected = self.sign(&data);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            return Err(AuthError::SignatureMismatch);
        }

        let issued = DateTime::<Utc>::from_timestamp_millis(issued_millis)
            .ok_or(AuthError::TokenMalformed)?;
        if now - issued > self.ttl {
            return Err(AuthError::TokenExpired);
        }

        Ok(calendar_id.to_string())
    }

    fn sign(&self, data: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take keys of any size");
        mac.update(data.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Derive the HMAC key from the configured secret.
fn signing_key(secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"goalcal-session-key-v1");
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper() -> SessionKeeper {
        SessionKeeper::new("test-secret", 30)
    }

    #[test]
    fn password_round_trip() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored).unwrap());
        assert!(!verify_password("hunter3", &stored).unwrap());
    }

    #[test]
    fn password_hashes_are_salted() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("x", "").is_err());
        assert!(verify_password("x", "bcrypt$whatever").is_err());
        assert!(verify_password("x", "pbkdf2-sha256$0$AA==$AA==").is_err());
        assert!(verify_password("x", "pbkdf2-sha256$1000$not-base64!$AA==").is_err());
    }

    #[test]
    fn token_round_trip() {
        let keeper = keeper();
        let now = Utc::now();
        let token = keeper.issue("alice-2026", now);
        assert_eq!(keeper.verify(&token, now).unwrap(), "alice-2026");
    }

    #[test]
    fn token_expires_after_ttl() {
        let keeper = keeper();
        let issued = Utc::now();
        let token = keeper.issue("alice-2026", issued);

        let just_inside = issued + Duration::days(29);
        assert!(keeper.verify(&token, just_inside).is_ok());

        let expired = issued + Duration::days(31);
        assert!(matches!(
            keeper.verify(&token, expired),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn tampered_token_fails_signature() {
        let keeper = keeper();
        let now = Utc::now();
        let token = keeper.issue("alice-2026", now);

        let decoded = String::from_utf8(B64.decode(&token).unwrap()).unwrap();
        let forged = decoded.replacen("alice-2026", "mallory-26", 1);
        let forged_token = B64.encode(forged);

        assert!(matches!(
            keeper.verify(&forged_token, now),
            Err(AuthError::SignatureMismatch)
        ));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = SessionKeeper::new("secret-a", 30).issue("alice-2026", Utc::now());
        assert!(SessionKeeper::new("secret-b", 30)
            .verify(&token, Utc::now())
            .is_err());
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        let keeper = keeper();
        let now = Utc::now();
        assert!(matches!(keeper.verify("", now), Err(AuthError::TokenMalformed)));
        assert!(matches!(
            keeper.verify("%%%not-base64%%%", now),
            Err(AuthError::TokenMalformed)
        ));
        let no_parts = B64.encode("just-a-string");
        assert!(keeper.verify(&no_parts, now).is_err());
    }
}

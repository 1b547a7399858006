use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Subject is not valid UTF-8")]
    InvalidSubject,

    #[error("HMAC error: {0}")]
    HmacError(String),

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
}

/// Issue a bearer token with format: subject:expiry:nonce:signature
///
/// The subject is base64-encoded so it can never collide with the `:`
/// separators; expiry is unix seconds (`now + ttl`); the random nonce keeps
/// two tokens for the same subject distinct. The signature is
/// HMAC-SHA256(subject:expiry:nonce, secret), so the token is verifiable
/// without any server-side session state.
pub fn issue(subject: &str, secret: &str, ttl_seconds: u64) -> Result<String, TokenError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let expires_at = now + ttl_seconds;

    let subject_b64 = general_purpose::URL_SAFE_NO_PAD.encode(subject.as_bytes());

    // Cryptographically secure random nonce
    let nonce: [u8; 16] = rand::random();
    let nonce_b64 = general_purpose::URL_SAFE_NO_PAD.encode(nonce);

    let payload = format!("{subject_b64}:{expires_at}:{nonce_b64}");
    let signature = sign_payload(&payload, secret)?;

    Ok(format!("{payload}:{signature}"))
}

/// Check a token against the subject it is expected to belong to.
/// Returns Ok(false) when the token has expired, the signature does not
/// verify, or the embedded subject differs from `expected_subject`.
/// Returns Err only for structurally malformed tokens.
pub fn verify(token: &str, expected_subject: &str, secret: &str) -> Result<bool, TokenError> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 4 {
        return Err(TokenError::InvalidFormat);
    }

    let subject_b64 = parts[0];
    let expiry_str = parts[1];
    let nonce_b64 = parts[2];
    let provided_signature = parts[3];

    let expires_at: u64 = expiry_str.parse().map_err(|_| TokenError::InvalidFormat)?;

    // Check expiration
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    if now >= expires_at {
        return Ok(false); // Expired
    }

    // Verify signature over the embedded payload; verify_slice compares the
    // MAC in constant time
    let payload = format!("{subject_b64}:{expiry_str}:{nonce_b64}");
    let signature = general_purpose::URL_SAFE_NO_PAD.decode(provided_signature)?;
    if payload_mac(&payload, secret)?.verify_slice(&signature).is_err() {
        return Ok(false); // Forged or tampered
    }

    let subject_raw = general_purpose::URL_SAFE_NO_PAD.decode(subject_b64)?;
    let subject = String::from_utf8(subject_raw).map_err(|_| TokenError::InvalidSubject)?;

    Ok(subject == expected_subject)
}

/// Decode the embedded subject without checking the signature. Callers use
/// this to learn *which* account the token claims, then `verify` against it.
pub fn extract_subject(token: &str) -> Result<String, TokenError> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 4 {
        return Err(TokenError::InvalidFormat);
    }

    let subject_raw = general_purpose::URL_SAFE_NO_PAD.decode(parts[0])?;
    String::from_utf8(subject_raw).map_err(|_| TokenError::InvalidSubject)
}

/// Sign a payload using HMAC-SHA256
fn sign_payload(payload: &str, secret: &str) -> Result<String, TokenError> {
    let code_bytes = payload_mac(payload, secret)?.finalize().into_bytes();
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(code_bytes))
}

/// MAC over a payload, keyed with the signing secret.
fn payload_mac(payload: &str, secret: &str) -> Result<HmacSha256, TokenError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TokenError::HmacError(e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

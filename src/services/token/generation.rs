//! Minting new tokens.
//!
//! Not part of the validation path: login-style endpoints call [`create_token`] and then
//! [`manage_cookie_response`] so browser callers on allow-listed domains get the cookie too.

use axum::http::{HeaderMap, Response};
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{AuthError, CookiePolicy};

/// Entropy per token. Hex encoding doubles it to the 64 characters the header path expects.
pub const TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct GenerationError(#[from] getrandom::Error);

/// 32 bytes from the OS CSPRNG, hex encoded. Fails if the OS source is unavailable.
pub fn create_token() -> Result<String, GenerationError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Attaches the token cookie when the request comes from an allow-listed domain, otherwise
/// returns the response unchanged.
pub fn manage_cookie_response<B>(
    policy: &CookiePolicy,
    headers: &HeaderMap,
    response: Response<B>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Response<B>, AuthError> {
    match policy.allowed_origin(headers) {
        Some(host) => Ok(policy.attach_cookie(response, token, &host, now)?),
        None => Ok(response),
    }
}

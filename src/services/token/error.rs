use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

use super::validation::LookupError;

/// Why a request was turned away by the gate.
///
/// The credential variants carry the exact messages clients see; callers map them to a 401.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Neither the `access_token` cookie nor the `Authorization` header is present.
    #[error("No token found on request")]
    NoToken,

    #[error("No Bearer token found on Authorization header")]
    MissingBearerScheme,

    #[error("Bad Bearer token found on Authorization header")]
    BadTokenLength,

    #[error("Token is not valid")]
    InvalidToken,

    /// The user id lookup backend failed. Treated as a rejection (fail-closed).
    #[error("token lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("refreshed cookie could not be encoded: {0}")]
    CookieHeader(#[from] InvalidHeaderValue),
}

impl AuthError {
    /// Whether the request should be answered with 401. Lookup failures fail closed, so they count.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, Self::CookieHeader(_))
    }
}

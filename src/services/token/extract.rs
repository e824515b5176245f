//! Pulls a candidate token out of the request, one function per carrier.
//!
//! The two carriers are checked differently: cookie tokens were set by us, so any non-empty value
//! is accepted, while header tokens must be exactly [`BEARER_TOKEN_LEN`] bytes long.

use axum::http::{HeaderMap, header};

use super::AuthError;
use super::cookie::COOKIE_NAME;

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// 32 random bytes, hex encoded.
pub const BEARER_TOKEN_LEN: usize = 64;

/// Reads the `access_token` cookie.
pub fn from_cookie(headers: &HeaderMap) -> Result<String, AuthError> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(AuthError::NoToken)
}

/// Reads the first `Authorization` header.
///
/// Checks run in a fixed order: presence, then the `Bearer ` scheme, then the token length.
pub fn from_header(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::NoToken)?;

    let token = value
        .as_bytes()
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingBearerScheme)?;

    if token.len() != BEARER_TOKEN_LEN {
        return Err(AuthError::BadTokenLength);
    }

    // 64 bytes of opaque (non UTF-8) data can never be one of our tokens.
    std::str::from_utf8(token)
        .map(str::to_owned)
        .map_err(|_| AuthError::BadTokenLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const TOKEN: &str = "8ba28a85ec598409d31ffc5e21117d0973f83040fac7599fbfd2db8edab84705";

    fn with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(name, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn cookie_token_found_among_others() {
        let h = with(header::COOKIE, &format!("theme=dark; access_token={TOKEN}; lang=fr"));
        assert_eq!(from_cookie(&h).unwrap(), TOKEN);
    }

    #[test]
    fn cookie_token_has_no_length_rule() {
        let h = with(header::COOKIE, "access_token=short");
        assert_eq!(from_cookie(&h).unwrap(), "short");
    }

    #[test]
    fn cookie_token_across_several_cookie_headers() {
        let mut h = with(header::COOKIE, "theme=dark");
        h.append(header::COOKIE, HeaderValue::from_static("access_token=second"));
        assert_eq!(from_cookie(&h).unwrap(), "second");
    }

    #[test]
    fn missing_or_empty_cookie_token() {
        let h = with(header::COOKIE, "theme=dark");
        assert!(matches!(from_cookie(&h), Err(AuthError::NoToken)));

        let h = with(header::COOKIE, "access_token=");
        assert!(matches!(from_cookie(&h), Err(AuthError::NoToken)));

        assert!(matches!(from_cookie(&HeaderMap::new()), Err(AuthError::NoToken)));
    }

    #[test]
    fn bearer_token() {
        let h = with(header::AUTHORIZATION, &format!("Bearer {TOKEN}"));
        assert_eq!(from_header(&h).unwrap(), TOKEN);
    }

    #[test]
    fn missing_authorization_header() {
        let err = from_header(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "No token found on request");
    }

    #[test]
    fn scheme_is_checked_before_length() {
        for value in [
            format!("NOTBEARER {TOKEN}"),
            format!("bearer {TOKEN}"),
            "Basic dXNlcjpwYXNz".to_string(),
            "Bearer".to_string(),
        ] {
            let err = from_header(&with(header::AUTHORIZATION, &value)).unwrap_err();
            assert_eq!(err.to_string(), "No Bearer token found on Authorization header");
        }
    }

    #[test]
    fn bearer_token_with_wrong_length() {
        for token in ["BAD-TOKEN-INVALID-LENGTH", "", &TOKEN[1..]] {
            let h = with(header::AUTHORIZATION, &format!("Bearer {token}"));
            let err = from_header(&h).unwrap_err();
            assert_eq!(err.to_string(), "Bad Bearer token found on Authorization header");
        }

        let h = with(header::AUTHORIZATION, &format!("Bearer {TOKEN}0"));
        assert!(matches!(from_header(&h), Err(AuthError::BadTokenLength)));
    }

    #[test]
    fn only_first_authorization_header_counts() {
        let mut h = with(header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        h.append(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {TOKEN}")).unwrap(),
        );
        assert!(matches!(from_header(&h), Err(AuthError::MissingBearerScheme)));
    }
}

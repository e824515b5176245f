//! Cross-origin cookie policy.
//!
//! Decides whether a caller is on an allow-listed domain (from `Referer`, else `Origin`) and
//! builds the `access_token` cookie handed back to those callers.

use std::collections::HashSet;

use axum::http::{
    HeaderMap, HeaderValue, Response, Uri,
    header::{self, InvalidHeaderValue},
};
use chrono::{DateTime, Duration, Utc};

/// Name of the cookie carrying the token.
pub const COOKIE_NAME: &str = "access_token";

/// Lifetime of an issued cookie, counted from issuance.
pub const COOKIE_LIFETIME_MINUTES: i64 = 30;

// weekday, dd-Mon-yyyy hh:mm:ss, zone
const EXPIRES_FORMAT: &str = "%a, %d-%b-%Y %H:%M:%S UTC";

#[derive(Debug, Clone, Default)]
pub struct CookiePolicy {
    domains: HashSet<String>,
}

impl CookiePolicy {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the allow-listed host the request claims to come from.
    ///
    /// `Referer` is authoritative whenever it is present: `Origin` is only read when there is no
    /// `Referer` header at all, even if the `Referer` value is unparsable or not allowed.
    /// The host is compared exactly as written (no case folding, no percent decoding).
    pub fn allowed_origin(&self, headers: &HeaderMap) -> Option<String> {
        let value = match headers.get(header::REFERER) {
            Some(referer) => referer,
            None => headers.get(header::ORIGIN)?,
        };

        let host = host_of(value)?;

        self.domains.contains(&host).then_some(host)
    }

    /// Formats the `Set-Cookie` value for `token`, expiring 30 minutes after `issued_at`.
    pub fn issue_cookie(&self, token: &str, host: &str, issued_at: DateTime<Utc>) -> String {
        let expires = issued_at + Duration::minutes(COOKIE_LIFETIME_MINUTES);

        format!(
            "{COOKIE_NAME}={token}; Expires={}; Domain={host}; Path=/; Secure; HttpOnly; SameSite=Strict",
            expires.format(EXPIRES_FORMAT)
        )
    }

    /// [`issue_cookie`](Self::issue_cookie) as a ready `Set-Cookie` header value.
    pub fn cookie_header(
        &self,
        token: &str,
        host: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.issue_cookie(token, host, issued_at))
    }

    /// Appends one `Set-Cookie` header. Existing headers are left untouched.
    pub fn attach_cookie<B>(
        &self,
        response: Response<B>,
        token: &str,
        host: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<Response<B>, InvalidHeaderValue> {
        let cookie = self.cookie_header(token, host, issued_at)?;
        Ok(append_cookie(response, cookie))
    }
}

pub(crate) fn append_cookie<B>(mut response: Response<B>, cookie: HeaderValue) -> Response<B> {
    response.headers_mut().append(header::SET_COOKIE, cookie);
    response
}

// Only absolute URIs carry a host; `example.org/x` is a path, not a host.
fn host_of(value: &HeaderValue) -> Option<String> {
    let uri: Uri = value.to_str().ok()?.parse().ok()?;
    uri.scheme()?;
    uri.host().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use chrono::TimeZone;

    fn policy() -> CookiePolicy {
        CookiePolicy::new(["example.org"])
    }

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn referer_host_is_allowed() {
        let h = headers(&[(header::REFERER, "https://example.org/endpoint")]);
        assert_eq!(policy().allowed_origin(&h).as_deref(), Some("example.org"));
    }

    #[test]
    fn origin_is_used_without_referer() {
        let h = headers(&[(header::ORIGIN, "https://example.org/endpoint")]);
        assert_eq!(policy().allowed_origin(&h).as_deref(), Some("example.org"));
    }

    #[test]
    fn no_origin_headers() {
        assert_eq!(policy().allowed_origin(&HeaderMap::new()), None);
    }

    #[test]
    fn unparsable_referer_does_not_fall_back_to_origin() {
        let h = headers(&[
            (header::REFERER, "https:/e^f"),
            (header::ORIGIN, "https://example.org"),
        ]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn disallowed_referer_wins_over_allowed_origin() {
        let h = headers(&[
            (header::REFERER, "https://badexample.org/endpoint"),
            (header::ORIGIN, "https://example.org"),
        ]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn schemeless_value_has_no_host() {
        let h = headers(&[(header::REFERER, "example.org/endpoint")]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn subdomains_are_not_matched() {
        let h = headers(&[(header::ORIGIN, "https://api.example.org")]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn host_case_must_match_exactly() {
        let h = headers(&[(header::REFERER, "https://EXAMPLE.ORG/endpoint")]);
        assert_eq!(policy().allowed_origin(&h), None);

        let mixed = CookiePolicy::new(["Example.org"]);
        let h = headers(&[(header::REFERER, "https://Example.org/endpoint")]);
        assert_eq!(mixed.allowed_origin(&h).as_deref(), Some("Example.org"));

        let h = headers(&[(header::REFERER, "https://example.org/endpoint")]);
        assert_eq!(mixed.allowed_origin(&h), None);
    }

    #[test]
    fn percent_encoded_host_is_not_decoded() {
        let h = headers(&[(header::ORIGIN, "https://exam%70le.org")]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn userinfo_and_port_are_not_part_of_host() {
        let h = headers(&[(header::REFERER, "https://user@example.org:8443/endpoint")]);
        assert_eq!(policy().allowed_origin(&h).as_deref(), Some("example.org"));
    }

    #[test]
    fn bare_host_without_scheme_is_ignored() {
        let h = headers(&[(header::ORIGIN, "example.org")]);
        assert_eq!(policy().allowed_origin(&h), None);
    }

    #[test]
    fn cookie_header_rejects_unencodable_token() {
        let issued_at = Utc.with_ymd_and_hms(2025, 10, 21, 6, 58, 0).unwrap();
        assert!(policy().cookie_header("a\nb", "example.org", issued_at).is_err());
    }

    #[test]
    fn allow_check_is_repeatable() {
        let h = headers(&[(header::ORIGIN, "https://example.org/path")]);
        let p = policy();
        assert_eq!(p.allowed_origin(&h), p.allowed_origin(&h));
    }

    #[test]
    fn cookie_wire_format() {
        let issued_at = Utc.with_ymd_and_hms(2025, 10, 21, 6, 58, 0).unwrap();
        let cookie = policy().issue_cookie("abc", "example.org", issued_at);

        assert_eq!(
            cookie,
            "access_token=abc; Expires=Tue, 21-Oct-2025 07:28:00 UTC; Domain=example.org; \
             Path=/; Secure; HttpOnly; SameSite=Strict"
        );
    }

    #[test]
    fn attach_appends_without_touching_existing_headers() {
        let issued_at = Utc.with_ymd_and_hms(2025, 10, 21, 6, 58, 0).unwrap();
        let response = Response::builder()
            .header(header::SET_COOKIE, "theme=dark")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::empty())
            .unwrap();

        let response = policy()
            .attach_cookie(response, "abc", "example.org", issued_at)
            .unwrap();

        let cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0], "theme=dark");
        assert!(cookies[1].starts_with("access_token=abc; Expires=Tue, 21-Oct-2025 07:28:00 UTC"));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }
}

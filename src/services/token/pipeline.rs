//! The per-request authentication decision.
//!
//! ```text
//! source -> extract -> validate -> forward -> (attach cookie) -> done
//!    \_________\__________\__________ rejected
//! ```
//!
//! The carrier is chosen once, before extraction. Every failure aborts immediately; the downstream
//! handler only runs after both extraction and validation succeeded.

use std::{fmt, future::Future, sync::Arc};

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    response::Response,
};
use chrono::{DateTime, Utc};

use super::cookie::append_cookie;
use super::{AuthError, CookiePolicy, TokenValidator, extract};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Where the token is read from for a given request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Caller is on an allow-listed domain; read the cookie and refresh it on the way out.
    Cookie { host: String },
    /// Everyone else; read `Authorization: Bearer`.
    Header,
}

/// Outcome of a successful [`AuthGate::authenticate`].
#[derive(Debug)]
pub struct Authenticated {
    pub request: Request<Body>,
    pub source: TokenSource,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthGate {
    policy: CookiePolicy,
    validator: Arc<dyn TokenValidator>,
    clock: Clock,
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(policy: CookiePolicy, validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            policy,
            validator,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the clock used for cookie expiry.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn source(&self, headers: &HeaderMap) -> TokenSource {
        match self.policy.allowed_origin(headers) {
            Some(host) => TokenSource::Cookie { host },
            None => TokenSource::Header,
        }
    }

    /// Extracts and validates the token without running any handler.
    pub async fn authenticate(&self, req: Request<Body>) -> Result<Authenticated, AuthError> {
        let source = self.source(req.headers());

        let token = match source {
            TokenSource::Cookie { .. } => extract::from_cookie(req.headers())?,
            TokenSource::Header => extract::from_header(req.headers())?,
        };

        let request = self.validator.validate(&token, req).await?;

        Ok(Authenticated {
            request,
            source,
            token,
        })
    }

    /// Authenticates `req`, hands the annotated request to `handler` and, on the cookie path only,
    /// appends a refreshed `access_token` cookie carrying the same token to its response.
    pub async fn process<F, Fut>(&self, req: Request<Body>, handler: F) -> Result<Response, AuthError>
    where
        F: FnOnce(Request<Body>) -> Fut,
        Fut: Future<Output = Response>,
    {
        let Authenticated {
            request,
            source,
            token,
        } = self.authenticate(req).await?;

        // Encode the refreshed cookie before the handler runs, so a failure never discards a
        // response whose side effects already happened.
        let cookie = match &source {
            TokenSource::Cookie { host } => {
                Some(self.policy.cookie_header(&token, host, (self.clock)())?)
            }
            TokenSource::Header => None,
        };

        let response = handler(request).await;

        Ok(match cookie {
            Some(cookie) => append_cookie(response, cookie),
            None => response,
        })
    }
}

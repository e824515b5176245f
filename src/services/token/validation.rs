//! Token validation contract.
//!
//! The gate only knows [`TokenValidator`]. Applications usually implement the smaller
//! [`UserIdLookup`] (token -> user id) and wrap it in a [`LookupValidator`].

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{body::Body, http::Request};
use thiserror::Error;

use super::AuthError;
use crate::api::v1::extractors::AuthCtx;

/// Resolves a token to a user and returns the request annotated with that user.
///
/// Implementations may perform I/O. Timeouts belong to the implementation or to the
/// surrounding framework; the gate calls `validate` exactly once per request.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str, req: Request<Body>) -> Result<Request<Body>, AuthError>;
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct LookupError(pub String);

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Maps a token to the id of the user it belongs to.
///
/// - `Ok(Some(uid))`: the token is known
/// - `Ok(None)`: no user matches the token
/// - `Err(_)`: the backing store failed (the gate rejects the request)
///
/// This is also the place to record things like a last-access time for the token.
#[async_trait]
pub trait UserIdLookup: Send + Sync {
    async fn retrieve_user_id(&self, token: &str) -> Result<Option<String>, LookupError>;
}

/// Validator that stores the looked-up user id as the request's [`AuthCtx`] (the `uid`).
#[derive(Debug, Clone)]
pub struct LookupValidator<L> {
    lookup: L,
}

impl<L: UserIdLookup> LookupValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<L: UserIdLookup> TokenValidator for LookupValidator<L> {
    async fn validate(
        &self,
        token: &str,
        mut req: Request<Body>,
    ) -> Result<Request<Body>, AuthError> {
        let user_id = self
            .lookup
            .retrieve_user_id(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        req.extensions_mut().insert(AuthCtx::new(user_id));
        Ok(req)
    }
}

/// Fixed token -> user id table, loaded once from configuration.
#[derive(Clone, Default)]
pub struct StaticTokenLookup {
    tokens: HashMap<String, String>,
}

impl std::fmt::Debug for StaticTokenLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tokens are credentials
        f.debug_struct("StaticTokenLookup")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl StaticTokenLookup {
    pub fn new<I, T, U>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            tokens: entries
                .into_iter()
                .map(|(token, uid)| (token.into(), uid.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl UserIdLookup for StaticTokenLookup {
    async fn retrieve_user_id(&self, token: &str) -> Result<Option<String>, LookupError> {
        Ok(self.tokens.get(token).cloned())
    }
}

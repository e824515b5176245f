/*
 * Responsibility
 * - The "authenticated request" type seen by handlers
 * - The token validator stores it in request extensions; handlers only read it
 */

/// Identity attached to a request once its token has been validated (the request's `uid`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: String,
}

impl AuthCtx {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

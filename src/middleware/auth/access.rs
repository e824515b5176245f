//! Token gate middleware: cookie or bearer token -> validation -> AuthCtx in extensions.
//!
//! The decision itself lives in [`AuthGate`]; this layer only feeds it the request, runs the rest
//! of the stack as the downstream handler and turns rejections into `AppError`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::token::{AuthGate, TokenSource};
use crate::state::AppState;

/// Put `router` behind the token gate.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot see State, so pass it explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    run_gate(&state.gate, req, next).await
}

async fn run_gate(gate: &AuthGate, req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let source = gate.source(req.headers());
    let via = match &source {
        TokenSource::Cookie { .. } => "cookie",
        TokenSource::Header => "header",
    };

    match gate.process(req, |req| next.run(req)).await {
        Ok(response) => {
            tracing::debug!(%method, %path, via, "request authenticated");
            Ok(response)
        }
        Err(err) => {
            tracing::warn!(%method, %path, via, error = %err, "request rejected by auth gate");
            Err(err.into())
        }
    }
}

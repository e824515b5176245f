/*
 * Responsibility
 * - Load Config -> build the auth gate -> assemble the Router
 * - Tracing / panic hook setup
 * - axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::token::{AuthGate, CookiePolicy, LookupValidator, StaticTokenLookup};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins, e.g. RUST_LOG=info,api_auth=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        cookie_domains = ?config.cookie_domains,
        static_tokens = config.static_tokens.len(),
        "starting API"
    );

    let state = build_state(&config);
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    let policy = CookiePolicy::new(config.cookie_domains.iter().cloned());
    let lookup = StaticTokenLookup::new(config.static_tokens.iter().cloned());
    let gate = AuthGate::new(policy, Arc::new(LookupValidator::new(lookup)));

    AppState::new(Arc::new(gate))
}

pub fn build_router(state: AppState, timeout: Duration) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, timeout)
}

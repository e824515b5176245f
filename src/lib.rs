//! Request-authentication gate for axum services.
//!
//! Tokens come from the `access_token` cookie for callers on allow-listed domains and from
//! `Authorization: Bearer` otherwise. See [`services::token::AuthGate`].
//!
//! Endpoints that mint tokens use [`services::token::create_token`] followed by
//! [`services::token::generation::manage_cookie_response`], which sets the cookie for browser
//! callers on allow-listed domains.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

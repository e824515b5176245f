/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Give handlers the identity resolved by the auth gate (AuthCtx)
 * - Keep the axum-specific part in core, the plain type in types
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;

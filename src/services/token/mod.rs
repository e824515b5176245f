//! Token authentication core: carrier selection, extraction, validation and cookie refresh.
//!
//! Nothing in here logs or builds HTTP status codes; that is left to the middleware.

pub mod cookie;
pub mod error;
pub mod extract;
pub mod generation;
pub mod pipeline;
pub mod validation;

pub use cookie::CookiePolicy;
pub use error::AuthError;
pub use generation::{GenerationError, create_token};
pub use pipeline::{AuthGate, Authenticated, TokenSource};
pub use validation::{LookupError, LookupValidator, StaticTokenLookup, TokenValidator, UserIdLookup};

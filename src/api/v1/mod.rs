/*
 * Responsibility
 * - v1 public surface (routes() re-export, extractors used by handlers)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;

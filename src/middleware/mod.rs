/*
 * Responsibility
 * - Middleware public interface
 * - auth: token gate for protected routes; http: cross-cutting transport layers
 */
pub mod auth;
pub mod http;

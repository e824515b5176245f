/*
 * Responsibility
 * - Domain services used by middleware and handlers
 * - HTTP framework wiring stays out of here
 */
pub mod token;

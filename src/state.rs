/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::token::AuthGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
}

impl AppState {
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

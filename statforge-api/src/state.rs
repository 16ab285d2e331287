//! Shared handler state.

use std::sync::Arc;

use crate::health::HealthProbe;

#[derive(Clone)]
pub struct AppState {
    pub probe: Arc<dyn HealthProbe>,
}

impl AppState {
    pub fn new(probe: impl HealthProbe) -> Self {
        Self {
            probe: Arc::new(probe),
        }
    }
}

//! Application state for the Delivery Fee Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PricingConfig};

/// Shared application state.
///
/// Holds the validated pricing configuration. It is immutable after startup,
/// so handlers share it through an `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded pricing configuration.
    config: Arc<PricingConfig>,
}

impl AppState {
    /// Creates a new application state with the given pricing configuration.
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

impl From<ConfigLoader> for AppState {
    fn from(loader: ConfigLoader) -> Self {
        Self::new(loader.into_config())
    }
}

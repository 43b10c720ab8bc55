//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading delivery
//! pricing configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PricingConfig, RawPricingConfig};

/// Loads and provides access to pricing configuration.
///
/// The pricing file has the following structure:
/// ```text
/// currency: EUR
/// cart:
///   small_order_minimum: 1000
/// distance:
///   base_distance: 1000
///   base_fee: 200
///   additional_distance: 500
///   additional_fee: 100
/// items:
///   surcharge_free_items: 4
///   per_item_surcharge: 50
///   bulk_threshold: 12
///   bulk_fee: 120
/// rush:
///   timezone: utc
///   applies_to: delivery_subtotal
///   windows:
///     - { weekday: friday, start: "15:00", end: "19:00", multiplier: "1.2" }
/// limits:
///   max_fee: 1500
///   free_delivery_threshold: 20000
/// ```
///
/// # Example
///
/// ```no_run
/// use delivery_fee_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pricing.yaml").unwrap();
/// println!("Fee cap: {}", loader.config().limits.max_fee);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file cannot be read
    /// - The file contains invalid YAML or unknown keys
    /// - Any required pricing parameter is missing or invalid
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses and validates configuration from YAML text.
    ///
    /// `source` names where the text came from and is used in parse errors.
    ///
    /// # Example
    ///
    /// ```
    /// use delivery_fee_engine::config::ConfigLoader;
    /// use delivery_fee_engine::error::EngineError;
    ///
    /// let result = ConfigLoader::from_yaml_str("cart: { small_order_minimum: 1000 }", "inline");
    /// assert!(matches!(result, Err(EngineError::MissingPricingParameter { .. })));
    /// ```
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let raw: RawPricingConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        let config = PricingConfig::try_from(raw)?;
        Ok(Self { config })
    }

    /// Wraps an already validated configuration.
    pub fn from_config(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Returns the pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Consumes the loader, returning the pricing configuration.
    pub fn into_config(self) -> PricingConfig {
        self.config
    }
}

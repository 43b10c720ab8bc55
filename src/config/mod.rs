//! Pricing configuration for the Delivery Fee Engine.
//!
//! This module loads the delivery pricing parameters from a YAML file and
//! validates that every parameter the fee rules need is present.
//!
//! # Example
//!
//! ```no_run
//! use delivery_fee_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/pricing.yaml").unwrap();
//! println!("Free delivery from: {}", loader.config().limits.free_delivery_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CartValueRule, DistanceRule, FeeLimits, ItemCountRule, MultiplierScope, PricingConfig,
    ReferenceTimezone, RushHourRule, RushWindow,
};

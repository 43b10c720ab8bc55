//! Delivery Fee Engine
//!
//! This crate calculates delivery fees from an order's cart value, delivery
//! distance, item count and order time, using pricing rules loaded from a
//! YAML configuration file. It can be used as a library or served over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

//! Core data models for the Delivery Fee Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod fee_result;
mod order;

pub use fee_result::{AuditStep, FeeBreakdown, FeeReport, FeeResult};
pub use order::{
    CART_VALUE_FIELD, DELIVERY_DISTANCE_FIELD, NUMBER_OF_ITEMS_FIELD, Order, TIME_FIELD,
    parse_order,
};

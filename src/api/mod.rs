//! HTTP API module for the Delivery Fee Engine.
//!
//! This module provides the REST API endpoints for calculating delivery
//! fees.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, DeliveryFeeResponse};
pub use state::AppState;

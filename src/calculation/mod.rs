//! Calculation logic for the Delivery Fee Engine.
//!
//! This module contains the four independent fee rules (small order
//! surcharge, distance fee, item count surcharge and rush hour multiplier)
//! and the aggregation that combines them into the final delivery fee.

mod cart_value;
mod distance;
mod item_count;
mod rush_hour;
mod total_fee;

pub use cart_value::{CartValueFeeResult, calculate_cart_value_fee};
pub use distance::{DistanceFeeResult, calculate_distance_fee};
pub use item_count::{ItemSurchargeResult, calculate_item_surcharge};
pub use rush_hour::{TimeMultiplierResult, calculate_time_multiplier, reference_time};
pub use total_fee::{apply_multiplier, calculate_delivery_fee, quote_delivery_fee};

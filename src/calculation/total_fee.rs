//! Delivery fee aggregation.
//!
//! Combines the four fee components into the final delivery fee, applying
//! the free delivery threshold and the fee cap.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::config::{MultiplierScope, PricingConfig};
use crate::error::EngineResult;
use crate::models::{AuditStep, FeeBreakdown, FeeResult, Order, parse_order};

use super::{
    calculate_cart_value_fee, calculate_distance_fee, calculate_item_surcharge,
    calculate_time_multiplier,
};

/// Scales an amount by a multiplier, rounding half away from zero to whole cents.
///
/// Saturates at `u64::MAX` if the product does not fit.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::calculation::apply_multiplier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(apply_multiplier(710, Decimal::new(12, 1)), 852);
/// assert_eq!(apply_multiplier(201, Decimal::new(15, 1)), 302);
/// ```
pub fn apply_multiplier(amount: u64, multiplier: Decimal) -> u64 {
    Decimal::from(amount)
        .checked_mul(multiplier)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_u64())
        .unwrap_or(u64::MAX)
}

/// Calculates the delivery fee for a validated order.
///
/// 1. If the cart value is at or above the free delivery threshold the fee is
///    0 and no component is computed.
/// 2. Otherwise the four components are computed independently and combined:
///    `round((cart_value_fee + distance_fee) * multiplier) + item_surcharge`,
///    or `round((cart_value_fee + distance_fee + item_surcharge) * multiplier)`
///    when the rush multiplier applies to the total.
/// 3. The result is capped at `max_fee`.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::calculation::calculate_delivery_fee;
/// use delivery_fee_engine::config::PricingConfig;
/// use delivery_fee_engine::models::Order;
/// use chrono::DateTime;
///
/// let order = Order {
///     cart_value: 790,
///     delivery_distance: 2235,
///     number_of_items: 4,
///     time: DateTime::parse_from_rfc3339("2024-01-15T13:00:00Z").unwrap(),
/// };
///
/// let result = calculate_delivery_fee(&order, &PricingConfig::standard());
/// assert_eq!(result.total_delivery_fee, 710);
/// ```
pub fn calculate_delivery_fee(order: &Order, config: &PricingConfig) -> FeeResult {
    let limits = &config.limits;

    if order.cart_value >= limits.free_delivery_threshold {
        let audit_step = AuditStep {
            step_number: 1,
            rule_id: "free_delivery".to_string(),
            rule_name: "Free Delivery".to_string(),
            input: serde_json::json!({
                "cart_value": order.cart_value,
                "free_delivery_threshold": limits.free_delivery_threshold
            }),
            output: serde_json::json!({
                "total_delivery_fee": 0,
                "free_delivery": true
            }),
            reasoning: format!(
                "Cart value {} meets free delivery threshold {} - delivery is free",
                order.cart_value, limits.free_delivery_threshold
            ),
        };

        return FeeResult {
            total_delivery_fee: 0,
            free_delivery: true,
            cap_applied: false,
            breakdown: None,
            audit_steps: vec![audit_step],
        };
    }

    let cart = calculate_cart_value_fee(order.cart_value, &config.cart, 1);
    let distance = calculate_distance_fee(order.delivery_distance, &config.distance, 2);
    let items = calculate_item_surcharge(order.number_of_items, &config.items, 3);
    let time = calculate_time_multiplier(&order.time, &config.rush, 4);

    let delivery_subtotal = cart.fee.saturating_add(distance.fee);
    let (scaled, scope_str) = match config.rush.applies_to {
        MultiplierScope::DeliverySubtotal => (
            apply_multiplier(delivery_subtotal, time.multiplier).saturating_add(items.surcharge),
            "delivery_subtotal",
        ),
        MultiplierScope::Total => (
            apply_multiplier(
                delivery_subtotal.saturating_add(items.surcharge),
                time.multiplier,
            ),
            "total",
        ),
    };

    let cap_applied = scaled > limits.max_fee;
    let total_delivery_fee = scaled.min(limits.max_fee);

    let formula = match config.rush.applies_to {
        MultiplierScope::DeliverySubtotal => format!(
            "round(({} + {}) x {}) + {} = {}",
            cart.fee,
            distance.fee,
            time.multiplier.normalize(),
            items.surcharge,
            scaled
        ),
        MultiplierScope::Total => format!(
            "round(({} + {} + {}) x {}) = {}",
            cart.fee,
            distance.fee,
            items.surcharge,
            time.multiplier.normalize(),
            scaled
        ),
    };
    let reasoning = if cap_applied {
        format!("{} (capped at maximum {})", formula, limits.max_fee)
    } else {
        formula
    };

    let total_step = AuditStep {
        step_number: 5,
        rule_id: "total_delivery_fee".to_string(),
        rule_name: "Total Delivery Fee".to_string(),
        input: serde_json::json!({
            "cart_value_fee": cart.fee,
            "distance_fee": distance.fee,
            "item_surcharge": items.surcharge,
            "time_multiplier": time.multiplier.normalize().to_string(),
            "multiplier_scope": scope_str,
            "max_fee": limits.max_fee
        }),
        output: serde_json::json!({
            "uncapped_fee": scaled,
            "total_delivery_fee": total_delivery_fee,
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    let breakdown = FeeBreakdown {
        cart_value_fee: cart.fee,
        distance_fee: distance.fee,
        item_surcharge: items.surcharge,
        time_multiplier: time.multiplier,
    };

    FeeResult {
        total_delivery_fee,
        free_delivery: false,
        cap_applied,
        breakdown: Some(breakdown),
        audit_steps: vec![
            cart.audit_step,
            distance.audit_step,
            items.audit_step,
            time.audit_step,
            total_step,
        ],
    }
}

/// Validates a raw order and calculates its delivery fee in one call.
///
/// # Errors
///
/// Returns a validation error naming the offending field if the order is invalid.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::calculation::quote_delivery_fee;
/// use delivery_fee_engine::config::PricingConfig;
/// use serde_json::json;
///
/// let raw = json!({
///     "cart_value": 790,
///     "delivery_distance": 2235,
///     "number_of_items": 4,
///     "time": "2024-01-15T13:00:00Z"
/// });
/// let result = quote_delivery_fee(&raw, &PricingConfig::standard()).unwrap();
/// assert_eq!(result.total_delivery_fee, 710);
/// ```
pub fn quote_delivery_fee(raw: &Value, config: &PricingConfig) -> EngineResult<FeeResult> {
    let order = parse_order(raw)?;
    Ok(calculate_delivery_fee(&order, config))
}

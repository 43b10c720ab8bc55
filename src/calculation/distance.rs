//! Distance fee calculation.
//!
//! A base fee covers the first distance tier. Every started unit beyond it
//! is billed as a full unit.

use crate::config::DistanceRule;
use crate::models::AuditStep;

/// The result of the distance rule, including the fee and audit step.
#[derive(Debug, Clone)]
pub struct DistanceFeeResult {
    /// Distance fee in cents.
    pub fee: u64,
    /// Number of billable units beyond the base distance.
    pub additional_units: u64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the distance fee for a delivery distance in meters.
///
/// `fee = base_fee + ceil((distance - base_distance) / additional_distance) * additional_fee`
/// when the distance exceeds the base distance, otherwise `base_fee`.
///
/// # Examples
///
/// ```
/// use delivery_fee_engine::calculation::calculate_distance_fee;
/// use delivery_fee_engine::config::DistanceRule;
///
/// let rule = DistanceRule {
///     base_distance: 1000,
///     base_fee: 200,
///     additional_distance: 500,
///     additional_fee: 100,
/// };
/// assert_eq!(calculate_distance_fee(1499, &rule, 1).fee, 300);
/// assert_eq!(calculate_distance_fee(1500, &rule, 1).fee, 300);
/// assert_eq!(calculate_distance_fee(1501, &rule, 1).fee, 400);
/// ```
pub fn calculate_distance_fee(
    delivery_distance: u64,
    rule: &DistanceRule,
    step_number: u32,
) -> DistanceFeeResult {
    let excess = delivery_distance.saturating_sub(rule.base_distance);
    // additional_distance is validated non-zero at config load
    let additional_units = excess.div_ceil(rule.additional_distance.max(1));
    let fee = rule
        .base_fee
        .saturating_add(additional_units.saturating_mul(rule.additional_fee));

    let reasoning = if additional_units > 0 {
        format!(
            "{} m: base {} + {} started {} m unit(s) x {} = {}",
            delivery_distance,
            rule.base_fee,
            additional_units,
            rule.additional_distance,
            rule.additional_fee,
            fee
        )
    } else {
        format!(
            "{} m is within the first {} m - base fee {}",
            delivery_distance, rule.base_distance, fee
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "distance_fee".to_string(),
        rule_name: "Distance Fee".to_string(),
        input: serde_json::json!({
            "delivery_distance": delivery_distance,
            "base_distance": rule.base_distance,
            "base_fee": rule.base_fee,
            "additional_distance": rule.additional_distance,
            "additional_fee": rule.additional_fee
        }),
        output: serde_json::json!({
            "additional_units": additional_units,
            "fee": fee
        }),
        reasoning,
    };

    DistanceFeeResult {
        fee,
        additional_units,
        audit_step,
    }
}

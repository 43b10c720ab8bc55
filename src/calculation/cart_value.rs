//! Small order surcharge calculation.
//!
//! Orders whose cart value is below the configured minimum pay the
//! difference as a surcharge.

use crate::config::CartValueRule;
use crate::models::AuditStep;

/// The result of the cart-value rule, including the fee and audit step.
#[derive(Debug, Clone)]
pub struct CartValueFeeResult {
    /// Surcharge in cents.
    pub fee: u64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the small order surcharge for a cart value.
///
/// The surcharge is `small_order_minimum - cart_value` when the cart value is
/// below the minimum and zero otherwise.
///
/// # Examples
///
/// ```
/// use delivery_fee_engine::calculation::calculate_cart_value_fee;
/// use delivery_fee_engine::config::CartValueRule;
///
/// let rule = CartValueRule { small_order_minimum: 1000 };
/// assert_eq!(calculate_cart_value_fee(890, &rule, 1).fee, 110);
/// assert_eq!(calculate_cart_value_fee(1000, &rule, 1).fee, 0);
/// ```
pub fn calculate_cart_value_fee(
    cart_value: u64,
    rule: &CartValueRule,
    step_number: u32,
) -> CartValueFeeResult {
    let fee = rule.small_order_minimum.saturating_sub(cart_value);

    let reasoning = if fee > 0 {
        format!(
            "Cart value {} is below minimum {}: surcharge {} - {} = {}",
            cart_value, rule.small_order_minimum, rule.small_order_minimum, cart_value, fee
        )
    } else {
        format!(
            "Cart value {} meets minimum {} - no small order surcharge",
            cart_value, rule.small_order_minimum
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "cart_value_fee".to_string(),
        rule_name: "Small Order Surcharge".to_string(),
        input: serde_json::json!({
            "cart_value": cart_value,
            "small_order_minimum": rule.small_order_minimum
        }),
        output: serde_json::json!({
            "fee": fee,
            "surcharge_applied": fee > 0
        }),
        reasoning,
    };

    CartValueFeeResult { fee, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> CartValueRule {
        CartValueRule {
            small_order_minimum: 1000,
        }
    }

    /// CV-001: below minimum pays the difference
    #[test]
    fn test_cv_001_below_minimum_pays_difference() {
        let result = calculate_cart_value_fee(890, &rule(), 1);

        assert_eq!(result.fee, 110);
        assert_eq!(result.audit_step.rule_id, "cart_value_fee");
        assert_eq!(result.audit_step.output["surcharge_applied"], true);
        assert!(result.audit_step.reasoning.contains("1000 - 890 = 110"));
    }

    /// CV-002: exactly at minimum is free
    #[test]
    fn test_cv_002_at_minimum_no_surcharge() {
        let result = calculate_cart_value_fee(1000, &rule(), 1);

        assert_eq!(result.fee, 0);
        assert_eq!(result.audit_step.output["surcharge_applied"], false);
        assert!(result.audit_step.reasoning.contains("no small order surcharge"));
    }

    /// CV-003: above minimum is free
    #[test]
    fn test_cv_003_above_minimum_no_surcharge() {
        assert_eq!(calculate_cart_value_fee(5000, &rule(), 1).fee, 0);
    }

    /// CV-004: empty cart pays the whole minimum
    #[test]
    fn test_cv_004_zero_cart_pays_full_minimum() {
        assert_eq!(calculate_cart_value_fee(0, &rule(), 1).fee, 1000);
    }

    /// CV-005: one cent below minimum
    #[test]
    fn test_cv_005_one_cent_below_minimum() {
        assert_eq!(calculate_cart_value_fee(999, &rule(), 1).fee, 1);
    }

    #[test]
    fn test_zero_minimum_never_charges() {
        let rule = CartValueRule {
            small_order_minimum: 0,
        };
        assert_eq!(calculate_cart_value_fee(0, &rule, 1).fee, 0);
    }

    #[test]
    fn test_fee_is_non_increasing_in_cart_value() {
        let mut previous = u64::MAX;
        for cart_value in (0..=1500).step_by(7) {
            let fee = calculate_cart_value_fee(cart_value, &rule(), 1).fee;
            assert!(fee <= previous, "fee rose at cart value {}", cart_value);
            previous = fee;
        }
    }

    #[test]
    fn test_audit_step_has_correct_step_number() {
        assert_eq!(calculate_cart_value_fee(500, &rule(), 4).audit_step.step_number, 4);
    }
}

//! Item count surcharge calculation.
//!
//! Items beyond the surcharge-free count are charged individually, and very
//! large orders additionally pay a flat bulk fee.

use crate::config::ItemCountRule;
use crate::models::AuditStep;

/// The result of the item count rule, including the surcharge and audit step.
#[derive(Debug, Clone)]
pub struct ItemSurchargeResult {
    /// Total item surcharge in cents (per-item part plus bulk fee).
    pub surcharge: u64,
    /// Number of items charged individually.
    pub charged_items: u32,
    /// True if the bulk fee was added.
    pub bulk_fee_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the item count surcharge.
///
/// - Items up to `surcharge_free_items` are free.
/// - Each item above that costs `per_item_surcharge`.
/// - If the count is strictly above `bulk_threshold`, `bulk_fee` is added.
///
/// # Examples
///
/// ```
/// use delivery_fee_engine::calculation::calculate_item_surcharge;
/// use delivery_fee_engine::config::ItemCountRule;
///
/// let rule = ItemCountRule {
///     surcharge_free_items: 4,
///     per_item_surcharge: 50,
///     bulk_threshold: 12,
///     bulk_fee: 120,
/// };
/// assert_eq!(calculate_item_surcharge(4, &rule, 1).surcharge, 0);
/// assert_eq!(calculate_item_surcharge(5, &rule, 1).surcharge, 50);
/// assert_eq!(calculate_item_surcharge(13, &rule, 1).surcharge, 570);
/// ```
pub fn calculate_item_surcharge(
    number_of_items: u32,
    rule: &ItemCountRule,
    step_number: u32,
) -> ItemSurchargeResult {
    let charged_items = number_of_items.saturating_sub(rule.surcharge_free_items);
    let per_item_total = u64::from(charged_items).saturating_mul(rule.per_item_surcharge);
    let bulk_fee_applied = number_of_items > rule.bulk_threshold;
    let bulk_fee = if bulk_fee_applied { rule.bulk_fee } else { 0 };
    let surcharge = per_item_total.saturating_add(bulk_fee);

    let reasoning = match (charged_items, bulk_fee_applied) {
        (0, _) => format!(
            "{} item(s) is within the {} surcharge-free items - no surcharge",
            number_of_items, rule.surcharge_free_items
        ),
        (_, false) => format!(
            "{} item(s) above {}: {} x {} = {}",
            charged_items, rule.surcharge_free_items, charged_items, rule.per_item_surcharge, surcharge
        ),
        (_, true) => format!(
            "{} item(s) above {}: {} x {} + bulk fee {} (more than {} items) = {}",
            charged_items,
            rule.surcharge_free_items,
            charged_items,
            rule.per_item_surcharge,
            rule.bulk_fee,
            rule.bulk_threshold,
            surcharge
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "item_surcharge".to_string(),
        rule_name: "Item Count Surcharge".to_string(),
        input: serde_json::json!({
            "number_of_items": number_of_items,
            "surcharge_free_items": rule.surcharge_free_items,
            "per_item_surcharge": rule.per_item_surcharge,
            "bulk_threshold": rule.bulk_threshold,
            "bulk_fee": rule.bulk_fee
        }),
        output: serde_json::json!({
            "charged_items": charged_items,
            "bulk_fee_applied": bulk_fee_applied,
            "surcharge": surcharge
        }),
        reasoning,
    };

    ItemSurchargeResult {
        surcharge,
        charged_items,
        bulk_fee_applied,
        audit_step,
    }
}

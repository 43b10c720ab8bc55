//! Fee result models for the Delivery Fee Engine.
//!
//! This module contains the [`FeeResult`] type and its associated structures
//! that capture all outputs from a fee calculation, including the component
//! breakdown and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Order;

/// The four independently computed fee components.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::models::FeeBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = FeeBreakdown {
///     cart_value_fee: 210,
///     distance_fee: 500,
///     item_surcharge: 0,
///     time_multiplier: Decimal::ONE,
/// };
/// assert_eq!(breakdown.cart_value_fee + breakdown.distance_fee, 710);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Small order surcharge in cents.
    pub cart_value_fee: u64,
    /// Distance fee in cents.
    pub distance_fee: u64,
    /// Item count surcharge in cents.
    pub item_surcharge: u64,
    /// Rush multiplier (1 outside every rush window).
    pub time_multiplier: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a delivery fee calculation.
///
/// `FeeResult` is a pure function of the order and the pricing
/// configuration: it carries no identifiers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeResult {
    /// The delivery fee in cents, within `[0, max_fee]`.
    pub total_delivery_fee: u64,
    /// True if the cart value met the free delivery threshold.
    pub free_delivery: bool,
    /// True if the aggregated fee was reduced to the configured maximum.
    pub cap_applied: bool,
    /// Component breakdown. Absent when free delivery skipped the components.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breakdown: Option<FeeBreakdown>,
    /// The sequence of calculation steps.
    pub audit_steps: Vec<AuditStep>,
}

/// A fee result stamped for an API response.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::models::{FeeReport, FeeResult, Order};
/// use chrono::{DateTime, Utc};
/// use uuid::Uuid;
///
/// let report = FeeReport {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     duration_us: 12,
///     order: Order {
///         cart_value: 25000,
///         delivery_distance: 1000,
///         number_of_items: 1,
///         time: DateTime::parse_from_rfc3339("2024-01-15T13:00:00Z").unwrap(),
///     },
///     result: FeeResult {
///         total_delivery_fee: 0,
///         free_delivery: true,
///         cap_applied: false,
///         breakdown: None,
///         audit_steps: vec![],
///     },
/// };
/// assert_eq!(report.result.total_delivery_fee, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Calculation duration in microseconds.
    pub duration_us: u64,
    /// The validated order.
    pub order: Order,
    /// The fee result.
    pub result: FeeResult,
}

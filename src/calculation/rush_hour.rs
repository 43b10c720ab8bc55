//! Time-of-day multiplier calculation.
//!
//! Orders placed inside a configured rush window get that window's
//! multiplier. Windows use an inclusive start and an exclusive end, matched
//! against either UTC or the order's own local time.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;

use crate::config::{ReferenceTimezone, RushHourRule};
use crate::models::AuditStep;

/// The result of the rush hour rule, including the multiplier and audit step.
#[derive(Debug, Clone)]
pub struct TimeMultiplierResult {
    /// Multiplier to apply (1 outside every window).
    pub multiplier: Decimal,
    /// Index of the window that supplied the multiplier, if any.
    pub matched_window: Option<usize>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the wall-clock date-time used to match rush windows.
pub fn reference_time(time: &DateTime<FixedOffset>, timezone: ReferenceTimezone) -> NaiveDateTime {
    match timezone {
        ReferenceTimezone::Utc => time.naive_utc(),
        ReferenceTimezone::OrderLocal => time.naive_local(),
    }
}

/// Calculates the time-of-day multiplier for an order timestamp.
///
/// When several windows contain the timestamp the largest multiplier wins.
///
/// # Examples
///
/// ```
/// use delivery_fee_engine::calculation::calculate_time_multiplier;
/// use delivery_fee_engine::config::PricingConfig;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let rule = PricingConfig::standard().rush;
///
/// // 2024-01-19 is a Friday
/// let rush = DateTime::parse_from_rfc3339("2024-01-19T15:00:00Z").unwrap();
/// assert_eq!(calculate_time_multiplier(&rush, &rule, 1).multiplier, Decimal::new(12, 1));
///
/// let after = DateTime::parse_from_rfc3339("2024-01-19T19:00:00Z").unwrap();
/// assert_eq!(calculate_time_multiplier(&after, &rule, 1).multiplier, Decimal::ONE);
/// ```
pub fn calculate_time_multiplier(
    time: &DateTime<FixedOffset>,
    rule: &RushHourRule,
    step_number: u32,
) -> TimeMultiplierResult {
    let reference = reference_time(time, rule.timezone);
    let weekday = reference.weekday();
    let clock = reference.time();

    let matched_window = rule
        .windows
        .iter()
        .enumerate()
        .filter(|(_, window)| window.contains(weekday, clock))
        .max_by(|(_, a), (_, b)| a.multiplier.cmp(&b.multiplier))
        .map(|(index, _)| index);

    let multiplier = matched_window
        .map(|index| rule.windows[index].multiplier)
        .unwrap_or(Decimal::ONE);

    let timezone_str = match rule.timezone {
        ReferenceTimezone::Utc => "utc",
        ReferenceTimezone::OrderLocal => "order_local",
    };

    let reasoning = match matched_window {
        Some(index) => {
            let window = &rule.windows[index];
            format!(
                "{} {} ({}) is inside rush window {} {}-{} - multiplier {}",
                weekday,
                clock,
                timezone_str,
                window.weekday,
                window.start,
                window.end,
                multiplier.normalize()
            )
        }
        None => format!(
            "{} {} ({}) is outside every rush window - multiplier 1",
            weekday, clock, timezone_str
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "time_multiplier".to_string(),
        rule_name: "Rush Hour Multiplier".to_string(),
        input: serde_json::json!({
            "time": time.to_rfc3339(),
            "timezone": timezone_str,
            "reference_weekday": weekday.to_string(),
            "reference_time": clock.to_string()
        }),
        output: serde_json::json!({
            "multiplier": multiplier.normalize().to_string(),
            "rush_applied": matched_window.is_some()
        }),
        reasoning,
    };

    TimeMultiplierResult {
        multiplier,
        matched_window,
        audit_step,
    }
}

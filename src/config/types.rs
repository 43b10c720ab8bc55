//! Configuration types for delivery fee pricing.
//!
//! Pricing files are deserialized into raw structures whose fields are all
//! optional, then validated into the strongly-typed rule structures used by
//! the calculation functions. A [`PricingConfig`] therefore always carries
//! every parameter the calculation needs.

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Cart-value (small order surcharge) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartValueRule {
    /// Cart value in cents below which the difference is charged as a surcharge.
    pub small_order_minimum: u64,
}

/// Distance fee parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceRule {
    /// Meters covered by the base fee.
    pub base_distance: u64,
    /// Fee in cents for the first `base_distance` meters.
    pub base_fee: u64,
    /// Length in meters of each billable unit beyond the base distance.
    pub additional_distance: u64,
    /// Fee in cents per started additional unit.
    pub additional_fee: u64,
}

/// Item count surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCountRule {
    /// Number of items that carry no surcharge.
    pub surcharge_free_items: u32,
    /// Surcharge in cents for each item above `surcharge_free_items`.
    pub per_item_surcharge: u64,
    /// Item count above which the bulk fee is added.
    pub bulk_threshold: u32,
    /// Flat bulk fee in cents.
    pub bulk_fee: u64,
}

/// The clock used to decide whether an order falls in a rush window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTimezone {
    /// Convert the order time to UTC before matching windows.
    Utc,
    /// Match windows against the wall-clock time in the order's own offset.
    OrderLocal,
}

/// Which part of the fee the rush multiplier scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierScope {
    /// Scale cart-value fee plus distance fee; the item surcharge is added afterwards.
    DeliverySubtotal,
    /// Scale the sum of all three fee components.
    Total,
}

/// A weekly peak window with its multiplier.
///
/// A time `t` is inside the window when it falls on `weekday` and
/// `start <= t < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RushWindow {
    /// Day of the week the window applies to.
    pub weekday: Weekday,
    /// Inclusive start time.
    pub start: NaiveTime,
    /// Exclusive end time.
    pub end: NaiveTime,
    /// Multiplier applied during the window (at least 1).
    pub multiplier: Decimal,
}

impl RushWindow {
    /// Returns true if the given weekday and wall-clock time fall inside this window.
    pub fn contains(&self, weekday: Weekday, time: NaiveTime) -> bool {
        self.weekday == weekday && self.start <= time && time < self.end
    }
}

/// Time-of-day multiplier parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RushHourRule {
    /// Clock used to match windows.
    pub timezone: ReferenceTimezone,
    /// Portion of the fee the multiplier scales.
    pub applies_to: MultiplierScope,
    /// Configured peak windows. May be empty.
    pub windows: Vec<RushWindow>,
}

/// Limits applied to the aggregated fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeLimits {
    /// Maximum delivery fee in cents.
    pub max_fee: u64,
    /// Cart value in cents at or above which delivery is free.
    pub free_delivery_threshold: u64,
}

/// The complete, validated pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingConfig {
    /// ISO 4217 code of the currency all amounts are expressed in (minor units).
    pub currency: String,
    /// Small order surcharge rule.
    pub cart: CartValueRule,
    /// Distance fee rule.
    pub distance: DistanceRule,
    /// Item surcharge rule.
    pub items: ItemCountRule,
    /// Rush hour multiplier rule.
    pub rush: RushHourRule,
    /// Cap and free delivery threshold.
    pub limits: FeeLimits,
}

impl PricingConfig {
    /// Returns the standard pricing used by `config/pricing.yaml`.
    ///
    /// - Small order surcharge below 10.00
    /// - 2.00 for the first 1000 m, then 1.00 per started 500 m
    /// - 0.50 per item from the 5th item, plus 1.20 above 12 items
    /// - Friday 15:00-19:00 UTC rush, multiplier 1.2
    /// - Fee capped at 15.00, free delivery from 200.00
    ///
    /// # Example
    ///
    /// ```
    /// use delivery_fee_engine::config::PricingConfig;
    ///
    /// let config = PricingConfig::standard();
    /// assert_eq!(config.limits.max_fee, 1500);
    /// assert_eq!(config.distance.base_fee, 200);
    /// ```
    pub fn standard() -> Self {
        Self {
            currency: "EUR".to_string(),
            cart: CartValueRule {
                small_order_minimum: 1000,
            },
            distance: DistanceRule {
                base_distance: 1000,
                base_fee: 200,
                additional_distance: 500,
                additional_fee: 100,
            },
            items: ItemCountRule {
                surcharge_free_items: 4,
                per_item_surcharge: 50,
                bulk_threshold: 12,
                bulk_fee: 120,
            },
            rush: RushHourRule {
                timezone: ReferenceTimezone::Utc,
                applies_to: MultiplierScope::DeliverySubtotal,
                windows: vec![RushWindow {
                    weekday: Weekday::Fri,
                    start: NaiveTime::from_hms_opt(15, 0, 0).expect("Valid rush start time"),
                    end: NaiveTime::from_hms_opt(19, 0, 0).expect("Valid rush end time"),
                    multiplier: Decimal::new(12, 1),
                }],
            },
            limits: FeeLimits {
                max_fee: 1500,
                free_delivery_threshold: 20000,
            },
        }
    }
}

/// Pricing file structure as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawPricingConfig {
    currency: Option<String>,
    cart: RawCartSection,
    distance: RawDistanceSection,
    items: RawItemsSection,
    rush: RawRushSection,
    limits: RawLimitsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCartSection {
    small_order_minimum: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDistanceSection {
    base_distance: Option<u64>,
    base_fee: Option<u64>,
    additional_distance: Option<u64>,
    additional_fee: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawItemsSection {
    surcharge_free_items: Option<u32>,
    per_item_surcharge: Option<u64>,
    bulk_threshold: Option<u32>,
    bulk_fee: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRushSection {
    timezone: Option<ReferenceTimezone>,
    applies_to: Option<MultiplierScope>,
    windows: Option<Vec<RawRushWindow>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRushWindow {
    weekday: Option<String>,
    start: Option<String>,
    end: Option<String>,
    multiplier: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLimitsSection {
    max_fee: Option<u64>,
    free_delivery_threshold: Option<u64>,
}

fn require<T>(value: Option<T>, parameter: &str) -> EngineResult<T> {
    value.ok_or_else(|| EngineError::MissingPricingParameter {
        parameter: parameter.to_string(),
    })
}

fn parse_window_time(value: &str, parameter: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            EngineError::invalid_parameter(
                parameter,
                format!("'{}' is not a time of day (expected HH:MM or HH:MM:SS)", value),
            )
        })
}

impl TryFrom<RawRushWindow> for RushWindow {
    type Error = EngineError;

    fn try_from(raw: RawRushWindow) -> EngineResult<Self> {
        let weekday_str = require(raw.weekday, "rush.windows.weekday")?;
        let weekday = weekday_str.parse::<Weekday>().map_err(|_| {
            EngineError::invalid_parameter(
                "rush.windows.weekday",
                format!("'{}' is not a day of the week", weekday_str),
            )
        })?;

        let start = parse_window_time(&require(raw.start, "rush.windows.start")?, "rush.windows.start")?;
        let end = parse_window_time(&require(raw.end, "rush.windows.end")?, "rush.windows.end")?;
        if start >= end {
            return Err(EngineError::invalid_parameter(
                "rush.windows.end",
                format!("window end {} must be after start {}", end, start),
            ));
        }

        let multiplier = require(raw.multiplier, "rush.windows.multiplier")?;
        if multiplier < Decimal::ONE {
            return Err(EngineError::invalid_parameter(
                "rush.windows.multiplier",
                format!("multiplier {} must be at least 1", multiplier),
            ));
        }

        Ok(RushWindow {
            weekday,
            start,
            end,
            multiplier,
        })
    }
}

impl TryFrom<RawPricingConfig> for PricingConfig {
    type Error = EngineError;

    fn try_from(raw: RawPricingConfig) -> EngineResult<Self> {
        let cart = CartValueRule {
            small_order_minimum: require(raw.cart.small_order_minimum, "cart.small_order_minimum")?,
        };

        let distance = DistanceRule {
            base_distance: require(raw.distance.base_distance, "distance.base_distance")?,
            base_fee: require(raw.distance.base_fee, "distance.base_fee")?,
            additional_distance: require(
                raw.distance.additional_distance,
                "distance.additional_distance",
            )?,
            additional_fee: require(raw.distance.additional_fee, "distance.additional_fee")?,
        };
        if distance.additional_distance == 0 {
            return Err(EngineError::invalid_parameter(
                "distance.additional_distance",
                "billable distance unit must be greater than zero",
            ));
        }

        let items = ItemCountRule {
            surcharge_free_items: require(
                raw.items.surcharge_free_items,
                "items.surcharge_free_items",
            )?,
            per_item_surcharge: require(raw.items.per_item_surcharge, "items.per_item_surcharge")?,
            bulk_threshold: require(raw.items.bulk_threshold, "items.bulk_threshold")?,
            bulk_fee: require(raw.items.bulk_fee, "items.bulk_fee")?,
        };
        if items.bulk_threshold < items.surcharge_free_items {
            return Err(EngineError::invalid_parameter(
                "items.bulk_threshold",
                format!(
                    "bulk threshold {} is below the surcharge-free item count {}",
                    items.bulk_threshold, items.surcharge_free_items
                ),
            ));
        }

        let rush = RushHourRule {
            timezone: require(raw.rush.timezone, "rush.timezone")?,
            applies_to: require(raw.rush.applies_to, "rush.applies_to")?,
            windows: require(raw.rush.windows, "rush.windows")?
                .into_iter()
                .map(RushWindow::try_from)
                .collect::<EngineResult<Vec<_>>>()?,
        };

        let limits = FeeLimits {
            max_fee: require(raw.limits.max_fee, "limits.max_fee")?,
            free_delivery_threshold: require(
                raw.limits.free_delivery_threshold,
                "limits.free_delivery_threshold",
            )?,
        };

        Ok(PricingConfig {
            currency: raw.currency.unwrap_or_else(|| "EUR".to_string()),
            cart,
            distance,
            items,
            rush,
            limits,
        })
    }
}

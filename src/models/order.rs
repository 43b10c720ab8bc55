//! Order model and order parsing.
//!
//! This module defines the [`Order`] struct and [`parse_order`], which
//! validates a raw JSON object into an `Order`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Field name of the cart value in cents.
pub const CART_VALUE_FIELD: &str = "cart_value";
/// Field name of the delivery distance in meters.
pub const DELIVERY_DISTANCE_FIELD: &str = "delivery_distance";
/// Field name of the number of items.
pub const NUMBER_OF_ITEMS_FIELD: &str = "number_of_items";
/// Field name of the order timestamp.
pub const TIME_FIELD: &str = "time";

/// A validated delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Value of the shopping cart in cents.
    pub cart_value: u64,
    /// Distance between the store and the customer in meters.
    pub delivery_distance: u64,
    /// Number of items in the cart (at least 1).
    pub number_of_items: u32,
    /// When the order was placed, with its original offset.
    pub time: DateTime<FixedOffset>,
}

/// Validates a raw JSON object into an [`Order`].
///
/// Unknown fields are ignored. The first invalid field found is reported.
///
/// # Errors
///
/// - [`EngineError::MissingField`] if a required field is absent or `null`
/// - [`EngineError::InvalidField`] if a field has the wrong type or is out of
///   range (negative value, zero items, timestamp without offset)
///
/// # Example
///
/// ```
/// use delivery_fee_engine::models::parse_order;
/// use serde_json::json;
///
/// let order = parse_order(&json!({
///     "cart_value": 790,
///     "delivery_distance": 2235,
///     "number_of_items": 4,
///     "time": "2024-01-15T13:00:00Z"
/// }))
/// .unwrap();
///
/// assert_eq!(order.cart_value, 790);
/// assert_eq!(order.number_of_items, 4);
/// ```
pub fn parse_order(raw: &Value) -> EngineResult<Order> {
    let fields = raw.as_object().ok_or_else(|| {
        EngineError::invalid_field("<body>", "order must be a JSON object")
    })?;

    let cart_value = non_negative_integer(fields, CART_VALUE_FIELD)?;
    let delivery_distance = non_negative_integer(fields, DELIVERY_DISTANCE_FIELD)?;

    let number_of_items = non_negative_integer(fields, NUMBER_OF_ITEMS_FIELD)?;
    if number_of_items == 0 {
        return Err(EngineError::invalid_field(
            NUMBER_OF_ITEMS_FIELD,
            "must be at least 1",
        ));
    }
    let number_of_items = u32::try_from(number_of_items).map_err(|_| {
        EngineError::invalid_field(
            NUMBER_OF_ITEMS_FIELD,
            format!("must not exceed {}", u32::MAX),
        )
    })?;

    let time = timestamp(fields, TIME_FIELD)?;

    Ok(Order {
        cart_value,
        delivery_distance,
        number_of_items,
        time,
    })
}

fn required<'a>(fields: &'a Map<String, Value>, name: &str) -> EngineResult<&'a Value> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(EngineError::MissingField {
            field: name.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

fn non_negative_integer(fields: &Map<String, Value>, name: &str) -> EngineResult<u64> {
    let value = required(fields, name)?;

    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    if value.as_i64().is_some() {
        return Err(EngineError::invalid_field(name, "must not be negative"));
    }

    Err(EngineError::invalid_field(
        name,
        format!("expected an integer, got {}", json_type_name(value)),
    ))
}

fn timestamp(fields: &Map<String, Value>, name: &str) -> EngineResult<DateTime<FixedOffset>> {
    let value = required(fields, name)?;
    let text = value.as_str().ok_or_else(|| {
        EngineError::invalid_field(
            name,
            format!("expected an ISO-8601 string, got {}", json_type_name(value)),
        )
    })?;

    DateTime::parse_from_rfc3339(text).map_err(|e| {
        EngineError::invalid_field(
            name,
            format!(
                "'{}' is not an ISO-8601 date-time with timezone offset: {}",
                text, e
            ),
        )
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn valid_order_json() -> Value {
        json!({
            "cart_value": 790,
            "delivery_distance": 2235,
            "number_of_items": 4,
            "time": "2024-01-15T13:00:00Z"
        })
    }

    fn with_field(field: &str, value: Value) -> Value {
        let mut raw = valid_order_json();
        raw[field] = value;
        raw
    }

    fn without_field(field: &str) -> Value {
        let mut raw = valid_order_json();
        raw.as_object_mut().unwrap().remove(field);
        raw
    }

    fn assert_invalid(raw: Value, expected_field: &str) {
        match parse_order(&raw) {
            Err(EngineError::InvalidField { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidField for {}, got {:?}", expected_field, other),
        }
    }

    /// OP-001: valid order parses
    #[test]
    fn test_op_001_valid_order_parses() {
        let order = parse_order(&valid_order_json()).unwrap();

        assert_eq!(order.cart_value, 790);
        assert_eq!(order.delivery_distance, 2235);
        assert_eq!(order.number_of_items, 4);
        assert_eq!(
            order.time,
            Utc.with_ymd_and_hms(2024, 1, 15, 13, 0, 0).unwrap()
        );
    }

    /// OP-002: every missing field is named
    #[test]
    fn test_op_002_missing_fields_are_named() {
        for name in [
            CART_VALUE_FIELD,
            DELIVERY_DISTANCE_FIELD,
            NUMBER_OF_ITEMS_FIELD,
            TIME_FIELD,
        ] {
            match parse_order(&without_field(name)) {
                Err(EngineError::MissingField { field }) => assert_eq!(field, name),
                other => panic!("Expected MissingField for {}, got {:?}", name, other),
            }
        }
    }

    /// OP-003: null counts as missing
    #[test]
    fn test_op_003_null_is_missing() {
        let result = parse_order(&with_field(CART_VALUE_FIELD, Value::Null));
        assert!(matches!(result, Err(EngineError::MissingField { .. })));
    }

    /// OP-004: negative cart value is rejected
    #[test]
    fn test_op_004_negative_cart_value() {
        assert_invalid(with_field(CART_VALUE_FIELD, json!(-1)), CART_VALUE_FIELD);
    }

    /// OP-005: negative distance is rejected
    #[test]
    fn test_op_005_negative_distance() {
        assert_invalid(
            with_field(DELIVERY_DISTANCE_FIELD, json!(-500)),
            DELIVERY_DISTANCE_FIELD,
        );
    }

    /// OP-006: zero items is rejected
    #[test]
    fn test_op_006_zero_items() {
        assert_invalid(
            with_field(NUMBER_OF_ITEMS_FIELD, json!(0)),
            NUMBER_OF_ITEMS_FIELD,
        );
    }

    /// OP-007: item count beyond u32 is rejected
    #[test]
    fn test_op_007_item_count_overflow() {
        assert_invalid(
            with_field(NUMBER_OF_ITEMS_FIELD, json!(u64::from(u32::MAX) + 1)),
            NUMBER_OF_ITEMS_FIELD,
        );
    }

    /// OP-008: wrong types are rejected
    #[test]
    fn test_op_008_wrong_types() {
        assert_invalid(with_field(CART_VALUE_FIELD, json!("790")), CART_VALUE_FIELD);
        assert_invalid(with_field(CART_VALUE_FIELD, json!(7.9)), CART_VALUE_FIELD);
        assert_invalid(
            with_field(DELIVERY_DISTANCE_FIELD, json!(true)),
            DELIVERY_DISTANCE_FIELD,
        );
        assert_invalid(with_field(TIME_FIELD, json!(1705323600)), TIME_FIELD);
    }

    /// OP-009: malformed timestamps are rejected
    #[test]
    fn test_op_009_malformed_timestamp() {
        assert_invalid(with_field(TIME_FIELD, json!("yesterday")), TIME_FIELD);
        assert_invalid(with_field(TIME_FIELD, json!("2024-13-40T25:00:00Z")), TIME_FIELD);
    }

    /// OP-010: timestamp without offset is rejected
    #[test]
    fn test_op_010_timestamp_without_offset() {
        assert_invalid(with_field(TIME_FIELD, json!("2024-01-15T13:00:00")), TIME_FIELD);
    }

    /// OP-011: offset is preserved
    #[test]
    fn test_op_011_offset_preserved() {
        let order = parse_order(&with_field(TIME_FIELD, json!("2024-01-19T17:30:00+02:00"))).unwrap();
        assert_eq!(order.time.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(
            order.time,
            Utc.with_ymd_and_hms(2024, 1, 19, 15, 30, 0).unwrap()
        );
    }

    /// OP-012: non-object body is rejected
    #[test]
    fn test_op_012_non_object_body() {
        assert_invalid(json!([1, 2, 3]), "<body>");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let order = parse_order(&with_field("coupon", json!("FREE"))).unwrap();
        assert_eq!(order.cart_value, 790);
    }

    #[test]
    fn test_zero_cart_value_and_distance_are_valid() {
        let mut raw = with_field(CART_VALUE_FIELD, json!(0));
        raw[DELIVERY_DISTANCE_FIELD] = json!(0);
        let order = parse_order(&raw).unwrap();

        assert_eq!(order.cart_value, 0);
        assert_eq!(order.delivery_distance, 0);
    }
}

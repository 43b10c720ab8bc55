//! Error types for the Delivery Fee Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading pricing
//! configuration or validating an order.

use thiserror::Error;

/// The broad class an [`EngineError`] belongs to.
///
/// Validation errors are caused by the caller's input and can be fixed by
/// resubmitting a corrected order. Configuration errors are server-side and
/// fatal: no order can be priced until the pricing file is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing order field.
    Validation,
    /// Missing or invalid pricing configuration.
    Configuration,
}

/// The main error type for the Delivery Fee Engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use delivery_fee_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::MissingField {
///     field: "cart_value".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required field: cart_value");
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required pricing parameter is absent from the configuration.
    #[error("Missing pricing parameter: {parameter}")]
    MissingPricingParameter {
        /// Dotted path of the missing parameter (e.g. "distance.base_fee").
        parameter: String,
    },

    /// A pricing parameter is present but has an unusable value.
    #[error("Invalid pricing parameter '{parameter}': {message}")]
    InvalidPricingParameter {
        /// Dotted path of the offending parameter.
        parameter: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A required order field was not provided.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// An order field has the wrong type or is out of range.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The name of the invalid field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingField { .. } | EngineError::InvalidField { .. } => {
                ErrorKind::Validation
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::MissingPricingParameter { .. }
            | EngineError::InvalidPricingParameter { .. } => ErrorKind::Configuration,
        }
    }

    /// Returns the order field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::MissingField { field } | EngineError::InvalidField { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidPricingParameter {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/pricing.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/pricing.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_missing_pricing_parameter_displays_parameter() {
        let error = EngineError::MissingPricingParameter {
            parameter: "limits.max_fee".to_string(),
        };
        assert_eq!(error.to_string(), "Missing pricing parameter: limits.max_fee");
    }

    #[test]
    fn test_invalid_field_displays_field_and_message() {
        let error = EngineError::invalid_field("number_of_items", "must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid field 'number_of_items': must be at least 1"
        );
    }

    #[test]
    fn test_order_errors_are_validation_kind() {
        let missing = EngineError::MissingField {
            field: "time".to_string(),
        };
        let invalid = EngineError::invalid_field("time", "not a date-time");

        assert_eq!(missing.kind(), ErrorKind::Validation);
        assert_eq!(invalid.kind(), ErrorKind::Validation);
        assert_eq!(missing.field(), Some("time"));
        assert_eq!(invalid.field(), Some("time"));
    }

    #[test]
    fn test_pricing_errors_are_configuration_kind() {
        let errors = [
            EngineError::ConfigNotFound {
                path: "x".to_string(),
            },
            EngineError::ConfigParseError {
                path: "x".to_string(),
                message: "y".to_string(),
            },
            EngineError::MissingPricingParameter {
                parameter: "cart.small_order_minimum".to_string(),
            },
            EngineError::invalid_parameter("rush.timezone", "unknown timezone"),
        ];

        for error in errors {
            assert_eq!(error.kind(), ErrorKind::Configuration);
            assert_eq!(error.field(), None);
        }
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> EngineResult<()> {
            Err(EngineError::MissingField {
                field: "cart_value".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

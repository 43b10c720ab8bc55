//! HTTP request handlers for the Delivery Fee Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_delivery_fee, quote_delivery_fee};
use crate::error::EngineError;
use crate::models::{FeeReport, parse_order};

use super::response::{ApiError, ApiErrorResponse, DeliveryFeeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/delivery-fee", post(delivery_fee_handler))
        .route("/delivery-fee/breakdown", post(breakdown_handler))
        .with_state(state)
}

/// Handler for POST /delivery-fee endpoint.
///
/// Accepts an order and returns `{"total_delivery_fee": <int>}`.
async fn delivery_fee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing delivery fee request");

    let raw = match read_payload(payload, correlation_id) {
        Ok(raw) => raw,
        Err(response) => return response,
    };

    match quote_delivery_fee(&raw, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                total_delivery_fee = result.total_delivery_fee,
                free_delivery = result.free_delivery,
                cap_applied = result.cap_applied,
                "Delivery fee calculated"
            );
            json_response(
                StatusCode::OK,
                DeliveryFeeResponse {
                    total_delivery_fee: result.total_delivery_fee,
                },
            )
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /delivery-fee/breakdown endpoint.
///
/// Accepts an order and returns the full [`FeeReport`] with the component
/// breakdown and audit trace.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing delivery fee breakdown request");

    let raw = match read_payload(payload, correlation_id) {
        Ok(raw) => raw,
        Err(response) => return response,
    };

    let order = match parse_order(&raw) {
        Ok(order) => order,
        Err(err) => return error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let result = calculate_delivery_fee(&order, state.config());
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        total_delivery_fee = result.total_delivery_fee,
        duration_us,
        "Delivery fee breakdown calculated"
    );

    json_response(
        StatusCode::OK,
        FeeReport {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            order,
            result,
        },
    )
}

/// Unwraps the JSON body, turning extractor rejections into 400 responses.
fn read_payload(
    payload: Result<Json<Value>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<Value, Response> {
    match payload {
        Ok(Json(raw)) => Ok(raw),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::JsonDataError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err.body_text(),
                        "JSON data error"
                    );
                    ApiError::malformed_json(err.body_text())
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(json_response(StatusCode::BAD_REQUEST, error))
        }
    }
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        field = err.field().unwrap_or("-"),
        error = %err,
        "Delivery fee request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

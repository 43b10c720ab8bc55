//! Delivery Fee Engine server
//!
//! Loads the pricing configuration and serves the delivery fee API.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `DELIVERY_FEE_CONFIG`: pricing file (default `./config/pricing.yaml`)
//! - `DELIVERY_FEE_ADDR`: listen address (default `0.0.0.0:8000`)

use std::env;
use std::process::ExitCode;

use delivery_fee_engine::api::{AppState, create_router};
use delivery_fee_engine::config::ConfigLoader;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "./config/pricing.yaml";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path =
        env::var("DELIVERY_FEE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = match ConfigLoader::load(&config_path) {
        Ok(loader) => loader,
        Err(err) => {
            error!(path = %config_path, error = %err, "Failed to load pricing configuration");
            return ExitCode::FAILURE;
        }
    };

    let config = loader.config();
    info!(
        path = %config_path,
        currency = %config.currency,
        max_fee = config.limits.max_fee,
        free_delivery_threshold = config.limits.free_delivery_threshold,
        rush_windows = config.rush.windows.len(),
        "Pricing configuration loaded"
    );

    let addr = env::var("DELIVERY_FEE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %addr, "Delivery fee engine listening");
    if let Err(err) = axum::serve(listener, create_router(AppState::from(loader))).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

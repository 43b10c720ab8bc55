//! Performance benchmarks for the Delivery Fee Engine.
//!
//! This benchmark suite verifies that the calculation engine meets performance targets:
//! - Single fee calculation: < 10μs mean
//! - Single HTTP request: < 1ms mean
//! - Batch of 100 requests: < 50ms mean
//! - Batch of 1000 requests: < 500ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use delivery_fee_engine::api::{AppState, create_router};
use delivery_fee_engine::calculation::calculate_delivery_fee;
use delivery_fee_engine::config::ConfigLoader;
use delivery_fee_engine::models::Order;

use axum::{body::Body, http::Request};
use chrono::DateTime;
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/pricing.yaml").expect("Failed to load config");
    AppState::from(loader)
}

/// Creates an order body; every third order falls in the Friday rush.
fn create_order_body(i: usize) -> String {
    let time = if i % 3 == 0 {
        "2024-01-19T16:30:00Z"
    } else {
        "2024-01-15T13:00:00Z"
    };
    serde_json::json!({
        "cart_value": (i * 137) % 2500,
        "delivery_distance": 500 + (i * 311) % 6000,
        "number_of_items": 1 + i % 16,
        "time": time
    })
    .to_string()
}

fn post_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: Pure fee calculation without HTTP overhead.
///
/// Target: < 10μs mean
fn bench_single_calculation(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config/pricing.yaml").expect("Failed to load config");
    let config = loader.into_config();
    let order = Order {
        cart_value: 790,
        delivery_distance: 2235,
        number_of_items: 13,
        time: DateTime::parse_from_rfc3339("2024-01-19T16:30:00Z").unwrap(),
    };

    c.bench_function("single_calculation", |b| {
        b.iter(|| black_box(calculate_delivery_fee(black_box(&order), &config)))
    });
}

/// Benchmark: Single request through the router.
///
/// Target: < 1ms mean
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_order_body(0);

    let mut group = c.benchmark_group("single_request");
    for uri in ["/delivery-fee", "/delivery-fee/breakdown"] {
        group.bench_with_input(BenchmarkId::new("endpoint", uri), uri, |b, uri| {
            b.to_async(&rt).iter(|| async {
                let response = router
                    .clone()
                    .oneshot(post_request(uri, body.clone()))
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }
    group.finish();
}

/// Benchmark: Batches of requests with varied orders.
///
/// Target: < 50ms mean for 100, < 500ms mean for 1000
fn bench_batches(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let mut group = c.benchmark_group("batch_processing");
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    for batch_size in [100usize, 1000] {
        let bodies: Vec<String> = (0..batch_size).map(create_order_body).collect();

        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::new("requests", batch_size),
            &bodies,
            |b, bodies| {
                b.to_async(&rt).iter(|| async {
                    let mut results = Vec::with_capacity(bodies.len());
                    for body in bodies {
                        let router = create_router(state.clone());
                        let response = router
                            .oneshot(post_request("/delivery-fee", body.clone()))
                            .await
                            .unwrap();
                        results.push(response);
                    }
                    black_box(results)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_single_request,
    bench_batches,
);
criterion_main!(benches);

//! Metrics and observability utilities
//!
//! Prometheus-style metrics for the dataset store with standardized naming.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all catalog metrics
pub const METRICS_PREFIX: &str = "catalog";

/// Histogram buckets for store latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s, large batch imports
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of dataset page queries"
    );

    describe_histogram!(
        format!("{}_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Dataset page query latency in seconds"
    );

    describe_histogram!(
        format!("{}_query_results", METRICS_PREFIX),
        Unit::Count,
        "Rows returned per dataset page"
    );

    describe_counter!(
        format!("{}_batch_saves_total", METRICS_PREFIX),
        Unit::Count,
        "Total batched dataset saves"
    );

    describe_counter!(
        format!("{}_datasets_inserted_total", METRICS_PREFIX),
        Unit::Count,
        "Total dataset rows inserted through batched saves"
    );

    describe_counter!(
        format!("{}_insert_chunks_total", METRICS_PREFIX),
        Unit::Count,
        "Total physical insert statements committed"
    );

    describe_histogram!(
        format!("{}_batch_save_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Batched save latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Record a page query against the store
pub fn record_query(kind: &str, duration_secs: f64, result_count: usize) {
    counter!(
        format!("{}_queries_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_query_duration_seconds", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(duration_secs);

    histogram!(
        format!("{}_query_results", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(result_count as f64);
}

/// Record the outcome of a batched save
pub fn record_batch_save(duration_secs: f64, chunks_committed: usize, rows_inserted: u64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_batch_saves_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);

    counter!(format!("{}_insert_chunks_total", METRICS_PREFIX)).increment(chunks_committed as u64);
    counter!(format!("{}_datasets_inserted_total", METRICS_PREFIX)).increment(rows_inserted);

    histogram!(
        format!("{}_batch_save_duration_seconds", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .record(duration_secs);
}

//! Prometheus metrics definitions.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

/// Relevant source change events seen by the watch loop.
pub static CHANGE_EVENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "refsync_change_events_total",
        "Total number of relevant source change events"
    )
    .expect("change events metric registers once")
});

/// Pipeline runs by outcome.
pub static PIPELINE_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "refsync_pipeline_runs_total",
        "Total number of pipeline runs",
        &["outcome"]
    )
    .expect("pipeline runs metric registers once")
});

/// Pipeline run duration.
pub static PIPELINE_RUN_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "refsync_pipeline_run_duration_seconds",
        "Pipeline run duration in seconds",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("pipeline duration metric registers once")
});

/// Reload notifications sent.
pub static RELOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "refsync_reloads_total",
        "Total number of reload notifications broadcast"
    )
    .expect("reloads metric registers once")
});

/// Initialize all metrics (call once at startup).
pub fn init_metrics() {
    // Access lazy statics to register them
    let _ = &*CHANGE_EVENTS_TOTAL;
    let _ = &*PIPELINE_RUNS_TOTAL;
    let _ = &*PIPELINE_RUN_SECONDS;
    let _ = &*RELOADS_TOTAL;

    tracing::debug!("Prometheus metrics initialized");
}

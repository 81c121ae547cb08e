//! Live-reload dev server.
//!
//! This module provides:
//! - The SSE reload channel using axum
//! - Health and Prometheus metrics endpoints
//! - Tracing setup

mod app;
pub mod metrics;
mod observability;
mod reload;
mod rest;

pub use app::{shutdown_signal, App, ServerConfig};
pub use metrics::init_metrics;
pub use observability::{init_tracing, run_span};
pub use reload::{create_reload_router, ReloadBroadcaster, ReloadEvent, RELOAD_PATH};
pub use rest::{create_rest_router, HealthResponse};

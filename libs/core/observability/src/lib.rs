//! Observability utilities for the shop services.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Domain counters for orders, authentication and the contact form
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, ShopMetrics};
//!
//! init_metrics()?;
//!
//! ShopMetrics::record_order_created(3, 30.0);
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod shop;

pub use middleware::metrics_middleware;
pub use shop::{AuthOperation, ShopMetrics};

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder.
///
/// Call once at startup; later calls return the existing handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Order metrics
    describe_counter!("orders_created_total", "Orders placed");
    describe_histogram!(
        "order_value",
        "Server-computed order total in store currency"
    );
    describe_counter!(
        "order_status_changes_total",
        "Payment/delivery flag transitions by flag"
    );

    // Auth metrics
    describe_counter!(
        "auth_attempts_total",
        "Register and login attempts by outcome"
    );

    // Contact metrics
    describe_counter!(
        "contact_messages_total",
        "Contact form submissions by delivery outcome"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_before_init() {
        if get_metrics_handle().is_none() {
            assert_eq!(metrics_handler().await, "# Metrics not initialized\n");
        }
    }
}

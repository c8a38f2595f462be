//! Prometheus metrics for the HTTP services.
//!
//! - recorder installation and the `/metrics` handler
//! - [`EmployeeMetrics`] for employee record operations
//! - [`middleware::metrics_middleware`] for per-request counters
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, EmployeeMetrics, EmployeeOperation, OperationOutcome};
//!
//! init_metrics()?;
//! EmployeeMetrics::record(EmployeeOperation::Create, OperationOutcome::Success);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod employees;
pub mod middleware;

pub use employees::{EmployeeMetrics, EmployeeOperation, OperationOutcome};
pub use middleware::metrics_middleware;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder.
///
/// Safe to call repeatedly; only the first call installs anything.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for `GET /metrics`
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "employee_operations_total",
        "Employee operations by operation and outcome"
    );
    describe_histogram!(
        "employee_operation_duration_seconds",
        "Employee operation duration in seconds"
    );
}

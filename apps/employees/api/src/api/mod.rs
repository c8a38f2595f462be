use axum::{Router, routing::get};

pub mod employees;
pub mod health;

/// API routes without the `/api` prefix, which `create_router` adds.
///
/// Every sub-router already has its state applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    use domain_employees::entity::Model as Employee;

    Router::new().nest(Employee::URL, employees::router(state))
}

/// `/ready` with the database check; merged next to the stateless app router
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// `/metrics` in Prometheus text format
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(observability::metrics_handler))
}

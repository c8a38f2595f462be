//! Readiness check backed by a real database ping.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health_detailed;

/// `GET /ready`: 200 when PostgreSQL answers a ping, 503 otherwise
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let status = check_health_detailed(&state.db).await;
            tracing::debug!(
                response_time_ms = status.response_time_ms,
                healthy = status.healthy,
                "Database readiness probe"
            );

            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_default())
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

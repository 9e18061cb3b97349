//! Health check handler.

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use goalhorn_runtime::Command;

use crate::error::Result;
use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/health - Health check endpoint.
///
/// Enqueues a high-priority health check on the running queue and waits
/// for the consumer to execute it. Between cycles there is no queue and
/// the process reports `idle`.
pub async fn health(State(state): State<AppState>) -> Result<(StatusCode, Json<HealthResponse>)> {
    let uptime = state.config.uptime_seconds();

    let Some(queue) = state.queue.get().await else {
        return Ok((StatusCode::OK, Json(HealthResponse::new("idle", uptime))));
    };

    let (probe, signal) = Command::check_health();
    queue.enqueue(probe)?;

    match tokio::time::timeout(state.config.health_timeout, signal).await {
        Ok(Ok(())) => Ok((StatusCode::OK, Json(HealthResponse::new("ok", uptime)))),
        Ok(Err(_)) | Err(_) => {
            warn!(
                timeout_ms = state.config.health_timeout.as_millis() as u64,
                "Health check was not executed in time"
            );
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("unhealthy", uptime)),
            ))
        }
    }
}

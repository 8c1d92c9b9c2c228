//! Liveness probe — constant response, no dependency checks.

use axum::Json;
use letrades_core::message::HealthStatus;

/// `GET /api/health` — always `200 {"status":"OK"}`.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "OK");
    }
}

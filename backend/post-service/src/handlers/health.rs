/// Health endpoints for container probes
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    message: String,
    latency_ms: u64,
    timestamp: String,
}

pub async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "post-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Ready once the post store answers.
pub async fn readiness_check(service: web::Data<PostService>) -> HttpResponse {
    let start = Instant::now();
    let result = service.repository().health_check().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let response = match &result {
        Ok(()) => ReadinessResponse {
            ready: true,
            status: ComponentStatus::Healthy,
            message: "post store reachable".to_string(),
            latency_ms,
            timestamp: Utc::now().to_rfc3339(),
        },
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            ReadinessResponse {
                ready: false,
                status: ComponentStatus::Unhealthy,
                message: format!("post store check failed: {}", e),
                latency_ms,
                timestamp: Utc::now().to_rfc3339(),
            }
        }
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

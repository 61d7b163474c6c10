use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static RPC_CALLS: AtomicU64 = AtomicU64::new(0);
static RPC_ERRORS: AtomicU64 = AtomicU64::new(0);

pub fn increment_call_count() {
    RPC_CALLS.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    RPC_ERRORS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub rpc_calls_total: u64,
    pub rpc_errors_total: u64,
}

pub fn snapshot() -> MetricsResponse {
    MetricsResponse {
        rpc_calls_total: RPC_CALLS.load(Ordering::Relaxed),
        rpc_errors_total: RPC_ERRORS.load(Ordering::Relaxed),
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "RPC counters in Prometheus text format", body = String)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let current = snapshot();

    let metrics = format!(
        "# HELP rpc_calls_total Total number of RPC calls\n\
         # TYPE rpc_calls_total counter\n\
         rpc_calls_total {}\n\
         \n\
         # HELP rpc_errors_total Total number of RPC calls answered with a non-OK status\n\
         # TYPE rpc_errors_total counter\n\
         rpc_errors_total {}\n",
        current.rpc_calls_total, current.rpc_errors_total
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}

use crate::{health::HealthResponse, server::Server};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct HealthCheckQuery {
    /// "all" or the name of a single check, e.g. "database"
    #[serde(default)]
    check: Option<String>,
}

pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

/// Liveness plus optional component checks
#[utoipa::path(
    get,
    path = "/health",
    summary = "Health Check",
    tags = ["Health"],
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Json<HealthResponse> {
    Json(
        server
            .health_service
            .check_health(params.check.as_deref())
            .await,
    )
}

use crate::server::Server;
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate API",
        version = "1.0.0",
        description = "Read-only API over weather station measurements: precipitation, stations, temperature observations and statistics"
    ),
    paths(
        crate::routes::home::home,
        crate::routes::health::health_check,
        crate::routes::climate::precipitation,
        crate::routes::climate::stations,
        crate::routes::climate::tobs,
        crate::routes::climate::stats_from_start,
        crate::routes::climate::stats_for_range,
    ),
    components(
        schemas(
            crate::routes::ApiErrorResponse,
            crate::climate::PrecipitationByDate,
            crate::climate::StationEntry,
            crate::climate::TemperatureObservation,
            crate::climate::TemperatureStats,
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthCheckResult,
            crate::health::HealthSummary,
        )
    ),
    tags(
        (name = "Climate", description = "Climate observation queries"),
        (name = "Health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn create_docs_routes() -> Router<Server> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

use crate::{
    climate::{PrecipitationByDate, StationEntry, TemperatureObservation, TemperatureStats},
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
};
use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

/// Climate routes, nested under `/api/v1.0`.
///
/// The literal segments take precedence over `{start}`, so `/stations` is
/// never read as a start date.
pub fn create_climate_routes() -> Router<Server> {
    Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/{start}", get(stats_from_start))
        .route("/{start}/{end}", get(stats_for_range))
}

/// Precipitation over the last 12 months of data
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    summary = "Precipitation, Last 12 Months",
    description = "Date to precipitation for the 365 days ending at the most recent measurement. \
                   One value per date: when several stations report on the same day only one is kept.",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Precipitation keyed by date", body = PrecipitationByDate),
        (status = 500, description = "Store unavailable", body = ApiErrorResponse),
        (status = 504, description = "Query timed out", body = ApiErrorResponse)
    )
)]
pub async fn precipitation(
    State(server): State<Server>,
) -> Result<Json<PrecipitationByDate>, AppError> {
    let precipitation = server.climate_service.precipitation_last_year().await?;
    Ok(Json(precipitation))
}

/// All weather stations
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    summary = "List Stations",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Station codes and names", body = Vec<StationEntry>),
        (status = 500, description = "Store unavailable", body = ApiErrorResponse),
        (status = 504, description = "Query timed out", body = ApiErrorResponse)
    )
)]
pub async fn stations(State(server): State<Server>) -> Result<Json<Vec<StationEntry>>, AppError> {
    let stations = server.climate_service.stations().await?;
    Ok(Json(stations))
}

/// Temperature observations of the most active station over the last 12 months
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    summary = "Most Active Station Temperatures",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Dated temperature observations", body = Vec<TemperatureObservation>),
        (status = 500, description = "Store unavailable", body = ApiErrorResponse),
        (status = 504, description = "Query timed out", body = ApiErrorResponse)
    )
)]
pub async fn tobs(
    State(server): State<Server>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    let observations = server
        .climate_service
        .most_active_station_observations()
        .await?;
    Ok(Json(observations))
}

/// Temperature statistics from a start date onwards
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    summary = "Temperature Stats From Start",
    description = "The start date is compared as text and not validated; values matching no data yield nulls.",
    tags = ["Climate"],
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "TMIN/TAVG/TMAX, null when no data matches", body = TemperatureStats),
        (status = 500, description = "Store unavailable", body = ApiErrorResponse),
        (status = 504, description = "Query timed out", body = ApiErrorResponse)
    )
)]
pub async fn stats_from_start(
    State(server): State<Server>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, AppError> {
    let stats = server
        .climate_service
        .temperature_stats(&start, None)
        .await?;
    Ok(Json(stats))
}

/// Temperature statistics between two dates, inclusive
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    summary = "Temperature Stats For Range",
    description = "An end before the start is not an error; it matches nothing and yields nulls.",
    tags = ["Climate"],
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "TMIN/TAVG/TMAX, null when no data matches", body = TemperatureStats),
        (status = 500, description = "Store unavailable", body = ApiErrorResponse),
        (status = 504, description = "Query timed out", body = ApiErrorResponse)
    )
)]
pub async fn stats_for_range(
    State(server): State<Server>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, AppError> {
    let stats = server
        .climate_service
        .temperature_stats(&start, Some(&end))
        .await?;
    Ok(Json(stats))
}

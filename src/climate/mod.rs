//! Climate query service
//!
//! Translates the climate API operations into queries against the
//! measurement and station tables and shapes the rows into response types.
//! The service keeps no state between calls; every operation is a function of
//! its parameters and the current contents of the store.

pub mod config;
pub mod types;
pub mod window;

use crate::database::{DatabaseError, DatabaseManager};
use crate::metrics;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error};

pub use config::QueryConfig;
pub use types::{PrecipitationByDate, StationEntry, TemperatureObservation, TemperatureStats};
pub use window::trailing_window_start;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Stored measurement date '{0}' is not a YYYY-MM-DD date")]
    InvalidStoredDate(String),
    #[error("Query '{operation}' exceeded {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Read-only query service over the climate dataset.
///
/// Borrows the shared database manager per call and never closes it; the
/// owning server controls the connection lifecycle.
pub struct ClimateService {
    database: Arc<dyn DatabaseManager>,
    timeout: Duration,
}

impl ClimateService {
    pub fn new(database: Arc<dyn DatabaseManager>, config: &QueryConfig) -> Self {
        Self {
            database,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Precipitation for the trailing 365-day window ending at the most
    /// recent measurement.
    ///
    /// Rows arrive ordered by (date, station) and are folded into a map keyed
    /// by date. When several stations report on one day, the later row
    /// overwrites the earlier, so the value kept is the one from the
    /// lexicographically greatest station code. Values are not aggregated.
    ///
    /// An empty measurement table yields an empty map.
    pub async fn precipitation_last_year(&self) -> QueryResult<PrecipitationByDate> {
        bounded("precipitation", self.timeout, async {
            let measurements = self.database.measurements();

            let Some(most_recent) = measurements.most_recent_date().await? else {
                debug!("No measurements stored, returning empty precipitation map");
                return Ok(PrecipitationByDate::default());
            };
            let cutoff = trailing_window_start(&most_recent)?;
            debug!(%most_recent, %cutoff, "Querying precipitation window");

            let mut by_date = BTreeMap::new();
            for row in measurements.precipitation_since(&cutoff).await? {
                by_date.insert(row.date, row.prcp);
            }

            debug!(dates = by_date.len(), "Precipitation window collected");
            Ok(PrecipitationByDate(by_date))
        })
        .await
    }

    /// Every station's code and name, in storage order
    pub async fn stations(&self) -> QueryResult<Vec<StationEntry>> {
        bounded("stations", self.timeout, async {
            let stations = self.database.stations().list().await?;

            Ok(stations
                .into_iter()
                .map(|s| StationEntry {
                    station: s.station,
                    name: s.name,
                })
                .collect())
        })
        .await
    }

    /// Temperature observations of the most active station over the trailing
    /// 365-day window.
    ///
    /// The most active station is the one with the most measurement rows;
    /// ties go to the smallest station code. Returns an empty list when there
    /// are no measurements.
    pub async fn most_active_station_observations(
        &self,
    ) -> QueryResult<Vec<TemperatureObservation>> {
        bounded("tobs", self.timeout, async {
            let measurements = self.database.measurements();

            let Some(most_recent) = measurements.most_recent_date().await? else {
                debug!("No measurements stored, returning empty observation list");
                return Ok(Vec::new());
            };
            let cutoff = trailing_window_start(&most_recent)?;

            let Some(active) = measurements.most_active_station().await? else {
                return Ok(Vec::new());
            };
            debug!(
                station = %active.station,
                observations = active.observation_count,
                %cutoff,
                "Querying most active station"
            );

            let rows = measurements
                .observations_since(&active.station, &cutoff)
                .await?;

            Ok(rows
                .into_iter()
                .map(|r| TemperatureObservation {
                    date: r.date,
                    temperature: r.tobs,
                })
                .collect())
        })
        .await
    }

    /// Min/avg/max temperature for `start <= date`, further bounded by
    /// `date <= end` when given.
    ///
    /// Dates are compared as opaque strings and never validated. A value that
    /// matches nothing, or an `end` before `start`, produces all-null stats.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> QueryResult<TemperatureStats> {
        let operation = if end.is_some() {
            "stats_range"
        } else {
            "stats_start"
        };

        bounded(operation, self.timeout, async {
            debug!(start, end, "Querying temperature stats");
            let aggregate = self
                .database
                .measurements()
                .temperature_aggregate(start, end)
                .await?;

            let stats = TemperatureStats {
                tmin: aggregate.tmin,
                tavg: aggregate.tavg,
                tmax: aggregate.tmax,
            };
            if stats.is_empty() {
                debug!(start, end, "No measurements in range");
            }
            Ok(stats)
        })
        .await
    }
}

/// Run one query operation under the request timeout, recording its duration
async fn bounded<T, F>(operation: &'static str, limit: Duration, query: F) -> QueryResult<T>
where
    F: Future<Output = QueryResult<T>>,
{
    let start = Instant::now();

    let result = match tokio::time::timeout(limit, query).await {
        Ok(result) => result,
        Err(_) => Err(QueryError::Timeout {
            operation,
            seconds: limit.as_secs(),
        }),
    };

    metrics::track_query(operation, start.elapsed(), result.is_ok());
    if let Err(ref e) = result {
        error!(operation, "Climate query failed: {}", e);
    }

    result
}

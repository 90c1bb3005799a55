use crate::database::entities::measurement;
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// A (date, precipitation) pair from the measurement table
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// A (date, temperature) pair from the measurement table
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ObservationRow {
    pub date: String,
    pub tobs: f64,
}

/// Number of measurements recorded by one station
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct StationActivity {
    pub station: String,
    pub observation_count: i64,
}

/// Temperature aggregates; every field is `None` when no row matched
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct TemperatureAggregate {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct MostRecentDate {
    most_recent: Option<String>,
}

/// Read-only queries over the measurement table
pub struct MeasurementsDao {
    db: DatabaseConnection,
}

impl MeasurementsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Latest measurement date, or `None` when the table is empty
    pub async fn most_recent_date(&self) -> DatabaseResult<Option<String>> {
        let row = measurement::Entity::find()
            .select_only()
            .column_as(measurement::Column::Date.max(), "most_recent")
            .into_model::<MostRecentDate>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(row.and_then(|r| r.most_recent))
    }

    /// Precipitation for every measurement on or after `cutoff`.
    ///
    /// Ordered by date, then station code, so callers see a stable order when
    /// several stations report on the same day.
    pub async fn precipitation_since(&self, cutoff: &str) -> DatabaseResult<Vec<PrecipitationRow>> {
        let rows = measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::Prcp)
            .filter(measurement::Column::Date.gte(cutoff))
            .order_by_asc(measurement::Column::Date)
            .order_by_asc(measurement::Column::Station)
            .into_model::<PrecipitationRow>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(rows)
    }

    /// Station with the most measurements.
    ///
    /// Ties go to the lexicographically smallest station code.
    pub async fn most_active_station(&self) -> DatabaseResult<Option<StationActivity>> {
        let activity = measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Station)
            .column_as(measurement::Column::Id.count(), "observation_count")
            .group_by(measurement::Column::Station)
            .order_by_desc(measurement::Column::Id.count())
            .order_by_asc(measurement::Column::Station)
            .into_model::<StationActivity>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(activity)
    }

    /// Temperature observations of one station on or after `cutoff`, in row order
    pub async fn observations_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> DatabaseResult<Vec<ObservationRow>> {
        let rows = measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::Tobs)
            .filter(measurement::Column::Station.eq(station))
            .filter(measurement::Column::Date.gte(cutoff))
            .order_by_asc(measurement::Column::Id)
            .into_model::<ObservationRow>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(rows)
    }

    /// Min/avg/max temperature over `start <= date [<= end]` in one aggregate query
    pub async fn temperature_aggregate(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> DatabaseResult<TemperatureAggregate> {
        let mut select = measurement::Entity::find()
            .select_only()
            .column_as(measurement::Column::Tobs.min(), "tmin")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(measurement::Column::Tobs))),
                "tavg",
            )
            .column_as(measurement::Column::Tobs.max(), "tmax")
            .filter(measurement::Column::Date.gte(start));

        if let Some(end) = end {
            select = select.filter(measurement::Column::Date.lte(end));
        }

        let aggregate = select
            .into_model::<TemperatureAggregate>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(aggregate.unwrap_or_default())
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        measurement::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}

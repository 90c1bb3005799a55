use crate::database::entities::station;
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryOrder, QuerySelect,
};

/// Station code and display name
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct StationSummary {
    pub station: String,
    pub name: String,
}

/// Read-only queries over the station table
pub struct StationsDao {
    db: DatabaseConnection,
}

impl StationsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All stations in primary key order
    pub async fn list(&self) -> DatabaseResult<Vec<StationSummary>> {
        let stations = station::Entity::find()
            .select_only()
            .column(station::Column::Station)
            .column(station::Column::Name)
            .order_by_asc(station::Column::Id)
            .into_model::<StationSummary>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(stations)
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        station::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}

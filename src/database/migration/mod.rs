use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250101_000001_create_station_table;
mod m20250101_000002_create_measurement_table;
mod m20250101_000003_add_measurement_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_station_table::Migration),
            Box::new(m20250101_000002_create_measurement_table::Migration),
            Box::new(m20250101_000003_add_measurement_indexes::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Station {
    Table,
    Id,
    Station,
    Name,
    Latitude,
    Longitude,
    Elevation,
}

#[derive(Iden)]
pub enum Measurement {
    Table,
    Id,
    Station,
    Date,
    Prcp,
    Tobs,
}

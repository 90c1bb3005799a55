use super::Measurement;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Trailing-window and date-range filters
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_measurement_date")
                    .table(Measurement::Table)
                    .col(Measurement::Date)
                    .to_owned(),
            )
            .await?;

        // Most-active station grouping and per-station observations
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_measurement_station_date")
                    .table(Measurement::Table)
                    .col(Measurement::Station)
                    .col(Measurement::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_measurement_station_date")
                    .table(Measurement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_measurement_date")
                    .table(Measurement::Table)
                    .to_owned(),
            )
            .await
    }
}

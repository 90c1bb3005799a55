use super::Measurement;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to station: the reference is assumed, not enforced
        manager
            .create_table(
                Table::create()
                    .table(Measurement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measurement::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measurement::Station).string().not_null())
                    .col(ColumnDef::new(Measurement::Date).string().not_null())
                    .col(ColumnDef::new(Measurement::Prcp).double().null())
                    .col(ColumnDef::new(Measurement::Tobs).double().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Measurement::Table).to_owned())
            .await
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Container registry, filled by the bulk import
        manager
            .create_table(
                Table::create()
                    .table(ContainersRegistered::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContainersRegistered::ContainerId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContainersRegistered::Weight).big_integer())
                    .col(ColumnDef::new(ContainersRegistered::Unit).string())
                    .to_owned(),
            )
            .await?;

        // Weighing ledger. Ids come from the weighing time, never generated here.
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Direction).string().not_null())
                    .col(ColumnDef::new(Transactions::Truck).string().not_null())
                    .col(ColumnDef::new(Transactions::Containers).json().not_null())
                    .col(ColumnDef::new(Transactions::Bruto).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::TruckTara).big_integer())
                    .col(ColumnDef::new(Transactions::Neto).big_integer())
                    .col(
                        ColumnDef::new(Transactions::Produce)
                            .string()
                            .not_null()
                            .default("na"),
                    )
                    .col(
                        ColumnDef::new(Transactions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest record per truck
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_truck_time")
                    .table(Transactions::Table)
                    .col(Transactions::Truck)
                    .col(Transactions::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_session")
                    .table(Transactions::Table)
                    .col(Transactions::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_time")
                    .table(Transactions::Table)
                    .col(Transactions::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ContainersRegistered::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ContainersRegistered {
    Table,
    ContainerId,
    Weight,
    Unit,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    SessionId,
    Direction,
    Truck,
    Containers,
    Bruto,
    TruckTara,
    Neto,
    Produce,
    Timestamp,
}

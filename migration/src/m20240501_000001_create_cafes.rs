use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cafe::Table)
                    .if_not_exists()
                    .col(pk_auto(Cafe::Id))
                    .col(string_len(Cafe::Name, 250).not_null().unique_key())
                    .col(string_len(Cafe::MapUrl, 500).not_null())
                    .col(string_len(Cafe::ImgUrl, 500).not_null())
                    .col(string_len(Cafe::Location, 250).not_null())
                    .col(string_len(Cafe::Seats, 250).not_null())
                    .col(boolean(Cafe::HasToilet).not_null())
                    .col(boolean(Cafe::HasWifi).not_null())
                    .col(boolean(Cafe::HasSockets).not_null())
                    .col(boolean(Cafe::CanTakeCalls).not_null())
                    .col(string_len_null(Cafe::CoffeePrice, 250))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cafe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Cafe {
    Table,
    Id,
    Name,
    MapUrl,
    ImgUrl,
    Location,
    Seats,
    HasToilet,
    HasWifi,
    HasSockets,
    CanTakeCalls,
    CoffeePrice,
}

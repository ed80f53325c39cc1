use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::AddressId))
                    .col(string_len_null(Address::Region, 100))
                    .col(string_len_null(Address::District, 100))
                    .col(string_len_null(Address::City, 100))
                    .col(string_len_null(Address::Street, 100))
                    .col(string_len_null(Address::HouseNumber, 20))
                    .col(string_len_null(Address::ApartmentNumber, 20))
                    .col(string_len(Address::ZipCode, 6))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Address::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Address {
    Table,
    AddressId,
    Region,
    District,
    City,
    Street,
    HouseNumber,
    ApartmentNumber,
    ZipCode,
}

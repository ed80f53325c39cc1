use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(pk_auto(Equipment::EquipmentId))
                    .col(string(Equipment::Name))
                    .col(text_null(Equipment::Description))
                    .col(decimal_len_null(Equipment::Power, 10, 2))
                    .col(integer_null(Equipment::InspectionPeriod))
                    .col(integer_null(Equipment::ServiceLife))
                    .col(boolean_null(Equipment::HasThermometer))
                    .col(timestamp(Equipment::CreatedAt))
                    .col(timestamp(Equipment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Equipment {
    Table,
    EquipmentId,
    Name,
    Description,
    Power,
    InspectionPeriod,
    ServiceLife,
    HasThermometer,
    CreatedAt,
    UpdatedAt,
}

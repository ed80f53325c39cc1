use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EquipmentStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(EquipmentStatus::StatusId))
                    .col(string_len_uniq(EquipmentStatus::StatusName, 100))
                    .col(text_null(EquipmentStatus::Description))
                    .col(timestamp(EquipmentStatus::CreatedAt))
                    .col(timestamp(EquipmentStatus::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EquipmentStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EquipmentStatus {
    Table,
    StatusId,
    StatusName,
    Description,
    CreatedAt,
    UpdatedAt,
}

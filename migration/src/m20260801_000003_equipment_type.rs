use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EquipmentType::Table)
                    .if_not_exists()
                    .col(pk_auto(EquipmentType::EquipmentTypeId))
                    .col(string_len_uniq(EquipmentType::Name, 100))
                    .col(timestamp(EquipmentType::CreatedAt))
                    .col(timestamp(EquipmentType::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EquipmentType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EquipmentType {
    Table,
    EquipmentTypeId,
    Name,
    CreatedAt,
    UpdatedAt,
}

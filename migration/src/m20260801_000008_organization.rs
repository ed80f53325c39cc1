use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(pk_auto(Organization::OrganizationId))
                    .col(string_uniq(Organization::Name))
                    .col(string_null(Organization::Address))
                    .col(string_len_null(Organization::PhoneNumber, 20))
                    .col(string_null(Organization::ContactPerson))
                    .col(timestamp(Organization::CreatedAt))
                    .col(timestamp(Organization::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Organization {
    Table,
    OrganizationId,
    Name,
    Address,
    PhoneNumber,
    ContactPerson,
    CreatedAt,
    UpdatedAt,
}

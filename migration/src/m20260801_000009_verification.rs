use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000007_installed_equipment::InstalledEquipment,
    m20260801_000008_organization::Organization,
};

static IDX_VERIFICATION_INSTALLED_EQUIPMENT_ID: &str = "idx-verification-installed_equipment_id";
static FK_VERIFICATION_INSTALLED_EQUIPMENT_ID: &str = "fk-verification-installed_equipment_id";
static FK_VERIFICATION_ORGANIZATION_ID: &str = "fk-verification-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Verification::Table)
                    .if_not_exists()
                    .col(pk_auto(Verification::VerificationId))
                    .col(integer_null(Verification::InstalledEquipmentId))
                    .col(integer_null(Verification::OrganizationId))
                    .col(date(Verification::VerificationDate))
                    .col(string_null(Verification::VerifierName))
                    .col(text_null(Verification::Description))
                    .col(string_null(Verification::Result))
                    .col(timestamp(Verification::CreatedAt))
                    .col(timestamp(Verification::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VERIFICATION_INSTALLED_EQUIPMENT_ID)
                    .table(Verification::Table)
                    .col(Verification::InstalledEquipmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VERIFICATION_INSTALLED_EQUIPMENT_ID)
                    .from_tbl(Verification::Table)
                    .from_col(Verification::InstalledEquipmentId)
                    .to_tbl(InstalledEquipment::Table)
                    .to_col(InstalledEquipment::InstalledEquipmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VERIFICATION_ORGANIZATION_ID)
                    .from_tbl(Verification::Table)
                    .from_col(Verification::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VERIFICATION_ORGANIZATION_ID)
                    .table(Verification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VERIFICATION_INSTALLED_EQUIPMENT_ID)
                    .table(Verification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VERIFICATION_INSTALLED_EQUIPMENT_ID)
                    .table(Verification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Verification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Verification {
    Table,
    VerificationId,
    InstalledEquipmentId,
    OrganizationId,
    VerificationDate,
    VerifierName,
    Description,
    Result,
    CreatedAt,
    UpdatedAt,
}

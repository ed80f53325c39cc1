use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000002_subscriber::Subscriber, m20260801_000003_equipment_type::EquipmentType,
    m20260801_000004_equipment::Equipment, m20260801_000005_equipment_status::EquipmentStatus,
    m20260801_000006_agreement::Agreement,
};

static IDX_INSTALLED_EQUIPMENT_SUBSCRIBER_ID: &str = "idx-installed_equipment-subscriber_id";
static IDX_INSTALLED_EQUIPMENT_AGREEMENT_ID: &str = "idx-installed_equipment-agreement_id";
static FK_INSTALLED_EQUIPMENT_SUBSCRIBER_ID: &str = "fk-installed_equipment-subscriber_id";
static FK_INSTALLED_EQUIPMENT_AGREEMENT_ID: &str = "fk-installed_equipment-agreement_id";
static FK_INSTALLED_EQUIPMENT_EQUIPMENT_TYPE_ID: &str = "fk-installed_equipment-equipment_type_id";
static FK_INSTALLED_EQUIPMENT_STATUS_ID: &str = "fk-installed_equipment-status_id";
static FK_INSTALLED_EQUIPMENT_EQUIPMENT_ID: &str = "fk-installed_equipment-equipment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InstalledEquipment::Table)
                    .if_not_exists()
                    .col(pk_auto(InstalledEquipment::InstalledEquipmentId))
                    .col(integer(InstalledEquipment::SubscriberId))
                    .col(integer(InstalledEquipment::AgreementId))
                    .col(integer(InstalledEquipment::EquipmentTypeId))
                    .col(integer_null(InstalledEquipment::StatusId))
                    .col(integer(InstalledEquipment::EquipmentId))
                    .col(date(InstalledEquipment::InstallationDate))
                    .col(string_null(InstalledEquipment::InstallationLocation))
                    .col(date_null(InstalledEquipment::LastInspectionDate))
                    .col(date_null(InstalledEquipment::NextInspectionDate))
                    .col(text_null(InstalledEquipment::Notes))
                    .col(timestamp(InstalledEquipment::CreatedAt))
                    .col(timestamp(InstalledEquipment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_INSTALLED_EQUIPMENT_SUBSCRIBER_ID)
                    .table(InstalledEquipment::Table)
                    .col(InstalledEquipment::SubscriberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_INSTALLED_EQUIPMENT_AGREEMENT_ID)
                    .table(InstalledEquipment::Table)
                    .col(InstalledEquipment::AgreementId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLED_EQUIPMENT_SUBSCRIBER_ID)
                    .from_tbl(InstalledEquipment::Table)
                    .from_col(InstalledEquipment::SubscriberId)
                    .to_tbl(Subscriber::Table)
                    .to_col(Subscriber::SubscriberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLED_EQUIPMENT_AGREEMENT_ID)
                    .from_tbl(InstalledEquipment::Table)
                    .from_col(InstalledEquipment::AgreementId)
                    .to_tbl(Agreement::Table)
                    .to_col(Agreement::AgreementId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLED_EQUIPMENT_EQUIPMENT_TYPE_ID)
                    .from_tbl(InstalledEquipment::Table)
                    .from_col(InstalledEquipment::EquipmentTypeId)
                    .to_tbl(EquipmentType::Table)
                    .to_col(EquipmentType::EquipmentTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLED_EQUIPMENT_STATUS_ID)
                    .from_tbl(InstalledEquipment::Table)
                    .from_col(InstalledEquipment::StatusId)
                    .to_tbl(EquipmentStatus::Table)
                    .to_col(EquipmentStatus::StatusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_INSTALLED_EQUIPMENT_EQUIPMENT_ID)
                    .from_tbl(InstalledEquipment::Table)
                    .from_col(InstalledEquipment::EquipmentId)
                    .to_tbl(Equipment::Table)
                    .to_col(Equipment::EquipmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [
            FK_INSTALLED_EQUIPMENT_EQUIPMENT_ID,
            FK_INSTALLED_EQUIPMENT_STATUS_ID,
            FK_INSTALLED_EQUIPMENT_EQUIPMENT_TYPE_ID,
            FK_INSTALLED_EQUIPMENT_AGREEMENT_ID,
            FK_INSTALLED_EQUIPMENT_SUBSCRIBER_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(InstalledEquipment::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_INSTALLED_EQUIPMENT_AGREEMENT_ID)
                    .table(InstalledEquipment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_INSTALLED_EQUIPMENT_SUBSCRIBER_ID)
                    .table(InstalledEquipment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InstalledEquipment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum InstalledEquipment {
    Table,
    InstalledEquipmentId,
    SubscriberId,
    AgreementId,
    EquipmentTypeId,
    StatusId,
    EquipmentId,
    InstallationDate,
    InstallationLocation,
    LastInspectionDate,
    NextInspectionDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000002_subscriber::Subscriber;

static IDX_AGREEMENT_SUBSCRIBER_ID: &str = "idx-agreement-subscriber_id";
static FK_AGREEMENT_SUBSCRIBER_ID: &str = "fk-agreement-subscriber_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agreement::Table)
                    .if_not_exists()
                    .col(pk_auto(Agreement::AgreementId))
                    .col(integer(Agreement::SubscriberId))
                    .col(string_len_uniq(Agreement::AgreementNumber, 50))
                    .col(date(Agreement::StartDate))
                    .col(date_null(Agreement::EndDate))
                    .col(text_null(Agreement::Notes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AGREEMENT_SUBSCRIBER_ID)
                    .table(Agreement::Table)
                    .col(Agreement::SubscriberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AGREEMENT_SUBSCRIBER_ID)
                    .from_tbl(Agreement::Table)
                    .from_col(Agreement::SubscriberId)
                    .to_tbl(Subscriber::Table)
                    .to_col(Subscriber::SubscriberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_AGREEMENT_SUBSCRIBER_ID)
                    .table(Agreement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AGREEMENT_SUBSCRIBER_ID)
                    .table(Agreement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Agreement::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Agreement {
    Table,
    AgreementId,
    SubscriberId,
    AgreementNumber,
    StartDate,
    EndDate,
    Notes,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000001_address::Address;

static IDX_SUBSCRIBER_ADDRESS_ID: &str = "idx-subscriber-address_id";
static FK_SUBSCRIBER_ADDRESS_ID: &str = "fk-subscriber-address_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriber::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscriber::SubscriberId))
                    .col(string_len(Subscriber::FirstName, 100))
                    .col(string_len(Subscriber::LastName, 100))
                    .col(string_len_null(Subscriber::MiddleName, 100))
                    .col(date_null(Subscriber::DateOfBirth))
                    .col(string_len_null(Subscriber::PhoneNumber, 20))
                    .col(string_len_null(Subscriber::Email, 100))
                    .col(
                        ColumnDef::new(Subscriber::Snils)
                            .string_len(11)
                            .null()
                            .unique_key(),
                    )
                    .col(string(Subscriber::Password))
                    .col(boolean(Subscriber::IsActivated).default(false))
                    .col(string_null(Subscriber::ActivationCode))
                    .col(timestamp_null(Subscriber::ActivationCodeExpires))
                    .col(string_len(Subscriber::Role, 20).default("USER"))
                    .col(
                        string_len(Subscriber::ActivationEmailStatus, 20).default("pending"),
                    )
                    .col(integer_null(Subscriber::AddressId))
                    .col(timestamp(Subscriber::CreatedAt))
                    .col(timestamp(Subscriber::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBSCRIBER_ADDRESS_ID)
                    .table(Subscriber::Table)
                    .col(Subscriber::AddressId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SUBSCRIBER_ADDRESS_ID)
                    .from_tbl(Subscriber::Table)
                    .from_col(Subscriber::AddressId)
                    .to_tbl(Address::Table)
                    .to_col(Address::AddressId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SUBSCRIBER_ADDRESS_ID)
                    .table(Subscriber::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBSCRIBER_ADDRESS_ID)
                    .table(Subscriber::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Subscriber::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subscriber {
    Table,
    SubscriberId,
    FirstName,
    LastName,
    MiddleName,
    DateOfBirth,
    PhoneNumber,
    Email,
    Snils,
    Password,
    IsActivated,
    ActivationCode,
    ActivationCodeExpires,
    Role,
    ActivationEmailStatus,
    AddressId,
    CreatedAt,
    UpdatedAt,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role gating access to administrative endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// Delivery state of the most recent activation email attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ActivationEmailStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "failed")]
    Failed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriber")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub subscriber_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// Insurance account number, exactly 11 digits when present.
    #[sea_orm(unique)]
    pub snils: Option<String>,
    /// Argon2 PHC hash, never the plaintext password.
    pub password: String,
    pub is_activated: bool,
    pub activation_code: Option<String>,
    pub activation_code_expires: Option<DateTime>,
    pub role: Role,
    pub activation_email_status: ActivationEmailStatus,
    pub address_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::AddressId"
    )]
    Address,
    #[sea_orm(has_many = "super::agreement::Entity")]
    Agreement,
    #[sea_orm(has_many = "super::installed_equipment::Entity")]
    InstalledEquipment,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::agreement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agreement.def()
    }
}

impl Related<super::installed_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstalledEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

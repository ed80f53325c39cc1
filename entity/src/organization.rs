use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// External organization performing equipment verifications.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organization")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub organization_id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub contact_person: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::verification::Entity")]
    Verification,
}

impl Related<super::verification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Verification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

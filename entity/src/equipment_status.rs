use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub status_id: i32,
    #[sea_orm(unique)]
    pub status_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::installed_equipment::Entity")]
    InstalledEquipment,
}

impl Related<super::installed_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstalledEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

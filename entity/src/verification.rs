use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Record of a verification performed on a piece of installed equipment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "verification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub verification_id: i32,
    pub installed_equipment_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub verification_date: Date,
    pub verifier_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub result: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::installed_equipment::Entity",
        from = "Column::InstalledEquipmentId",
        to = "super::installed_equipment::Column::InstalledEquipmentId"
    )]
    InstalledEquipment,
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::OrganizationId"
    )]
    Organization,
}

impl Related<super::installed_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstalledEquipment.def()
    }
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog model of a piece of equipment that can be installed at a
/// subscriber's location.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub equipment_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Rated power in kW, non-negative.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub power: Option<Decimal>,
    /// Months between mandatory inspections.
    pub inspection_period: Option<i32>,
    /// Service life in years.
    pub service_life: Option<i32>,
    pub has_thermometer: Option<bool>,
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

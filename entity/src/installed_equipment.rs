use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One physical unit from the equipment catalog placed at a subscriber's
/// location under an agreement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "installed_equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub installed_equipment_id: i32,
    pub subscriber_id: i32,
    pub agreement_id: i32,
    pub equipment_type_id: i32,
    pub status_id: Option<i32>,
    pub equipment_id: i32,
    pub installation_date: Date,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<Date>,
    pub next_inspection_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscriber::Entity",
        from = "Column::SubscriberId",
        to = "super::subscriber::Column::SubscriberId"
    )]
    Subscriber,
    #[sea_orm(
        belongs_to = "super::agreement::Entity",
        from = "Column::AgreementId",
        to = "super::agreement::Column::AgreementId"
    )]
    Agreement,
    #[sea_orm(
        belongs_to = "super::equipment_type::Entity",
        from = "Column::EquipmentTypeId",
        to = "super::equipment_type::Column::EquipmentTypeId"
    )]
    EquipmentType,
    #[sea_orm(
        belongs_to = "super::equipment_status::Entity",
        from = "Column::StatusId",
        to = "super::equipment_status::Column::StatusId"
    )]
    EquipmentStatus,
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::EquipmentId"
    )]
    Equipment,
    #[sea_orm(has_many = "super::verification::Entity")]
    Verification,
}

impl Related<super::subscriber::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriber.def()
    }
}

impl Related<super::agreement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agreement.def()
    }
}

impl Related<super::equipment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipmentType.def()
    }
}

impl Related<super::equipment_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipmentStatus.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl Related<super::verification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Verification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

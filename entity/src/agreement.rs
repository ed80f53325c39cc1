use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service contract tying a subscriber to a set of installed equipment over
/// a date range.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agreement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub agreement_id: i32,
    pub subscriber_id: i32,
    #[sea_orm(unique)]
    pub agreement_number: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscriber::Entity",
        from = "Column::SubscriberId",
        to = "super::subscriber::Column::SubscriberId"
    )]
    Subscriber,
    #[sea_orm(has_many = "super::installed_equipment::Entity")]
    InstalledEquipment,
}

impl Related<super::subscriber::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriber.def()
    }
}

impl Related<super::installed_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstalledEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

/// Catalog-entry fields for create/update. On update `None` leaves the
/// column untouched; blank-to-NULL normalization happens at the boundary.
#[derive(Default)]
pub struct EquipmentChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub power: Option<Decimal>,
    pub inspection_period: Option<i32>,
    pub service_life: Option<i32>,
    pub has_thermometer: Option<bool>,
}

pub struct EquipmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EquipmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        changes: EquipmentChanges,
    ) -> Result<entity::equipment::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let equipment = entity::equipment::ActiveModel {
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(changes.description),
            power: ActiveValue::Set(changes.power),
            inspection_period: ActiveValue::Set(changes.inspection_period),
            service_life: ActiveValue::Set(changes.service_life),
            has_thermometer: ActiveValue::Set(changes.has_thermometer),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        equipment.insert(self.db).await
    }

    pub async fn list(&self) -> Result<Vec<entity::equipment::Model>, DbErr> {
        entity::prelude::Equipment::find()
            .order_by_asc(entity::equipment::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get(&self, equipment_id: i32) -> Result<Option<entity::equipment::Model>, DbErr> {
        entity::prelude::Equipment::find_by_id(equipment_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, ids: Vec<i32>) -> Result<Vec<entity::equipment::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Equipment::find()
            .filter(entity::equipment::Column::EquipmentId.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        equipment_id: i32,
        changes: EquipmentChanges,
    ) -> Result<Option<entity::equipment::Model>, DbErr> {
        let equipment = match self.get(equipment_id).await? {
            Some(equipment) => equipment,
            None => return Ok(None),
        };

        let mut equipment = equipment.into_active_model();

        if let Some(name) = changes.name {
            equipment.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            equipment.description = ActiveValue::Set(Some(description));
        }
        if let Some(power) = changes.power {
            equipment.power = ActiveValue::Set(Some(power));
        }
        if let Some(inspection_period) = changes.inspection_period {
            equipment.inspection_period = ActiveValue::Set(Some(inspection_period));
        }
        if let Some(service_life) = changes.service_life {
            equipment.service_life = ActiveValue::Set(Some(service_life));
        }
        if let Some(has_thermometer) = changes.has_thermometer {
            equipment.has_thermometer = ActiveValue::Set(Some(has_thermometer));
        }
        equipment.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(equipment.update(self.db).await?))
    }

    pub async fn delete(&self, equipment_id: i32) -> Result<sea_orm::DeleteResult, DbErr> {
        entity::prelude::Equipment::delete_by_id(equipment_id)
            .exec(self.db)
            .await
    }
}

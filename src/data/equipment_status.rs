use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct EquipmentStatusRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EquipmentStatusRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<entity::equipment_status::Model>, DbErr> {
        entity::prelude::EquipmentStatus::find()
            .order_by_asc(entity::equipment_status::Column::StatusName)
            .all(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        ids: Vec<i32>,
    ) -> Result<Vec<entity::equipment_status::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EquipmentStatus::find()
            .filter(entity::equipment_status::Column::StatusId.is_in(ids))
            .all(self.db)
            .await
    }
}

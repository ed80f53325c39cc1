use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct EquipmentTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EquipmentTypeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<entity::equipment_type::Model>, DbErr> {
        entity::prelude::EquipmentType::find()
            .order_by_asc(entity::equipment_type::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        ids: Vec<i32>,
    ) -> Result<Vec<entity::equipment_type::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EquipmentType::find()
            .filter(entity::equipment_type::Column::EquipmentTypeId.is_in(ids))
            .all(self.db)
            .await
    }
}

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct VerificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifications for a set of installed-equipment rows, newest first.
    pub async fn list_by_installed_equipment(
        &self,
        installed_equipment_ids: Vec<i32>,
    ) -> Result<Vec<entity::verification::Model>, DbErr> {
        if installed_equipment_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Verification::find()
            .filter(
                entity::verification::Column::InstalledEquipmentId.is_in(installed_equipment_ids),
            )
            .order_by_desc(entity::verification::Column::VerificationDate)
            .all(self.db)
            .await
    }
}

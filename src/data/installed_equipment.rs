use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Fields for inserting one installed-equipment row. Required foreign keys
/// are checked by the caller before this struct is built.
pub struct NewInstalledEquipment {
    pub subscriber_id: i32,
    pub agreement_id: i32,
    pub equipment_type_id: i32,
    pub status_id: Option<i32>,
    pub equipment_id: i32,
    pub installation_date: NaiveDate,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Default, Clone)]
pub struct InstalledEquipmentChanges {
    pub subscriber_id: Option<i32>,
    pub agreement_id: Option<i32>,
    pub equipment_type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Equality filters for the list endpoint, plus a substring match on the
/// installation location.
#[derive(Default)]
pub struct InstalledEquipmentFilters {
    pub subscriber_id: Option<i32>,
    pub equipment_type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub installation_location: Option<String>,
}

pub struct InstalledEquipmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InstalledEquipmentRepository<'a, C> {
    /// Creates a new instance of [`InstalledEquipmentRepository`]
    ///
    /// Generic over the connection so batch creation can run against a
    /// transaction.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewInstalledEquipment,
    ) -> Result<entity::installed_equipment::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let installed = entity::installed_equipment::ActiveModel {
            subscriber_id: ActiveValue::Set(new.subscriber_id),
            agreement_id: ActiveValue::Set(new.agreement_id),
            equipment_type_id: ActiveValue::Set(new.equipment_type_id),
            status_id: ActiveValue::Set(new.status_id),
            equipment_id: ActiveValue::Set(new.equipment_id),
            installation_date: ActiveValue::Set(new.installation_date),
            installation_location: ActiveValue::Set(new.installation_location),
            last_inspection_date: ActiveValue::Set(new.last_inspection_date),
            next_inspection_date: ActiveValue::Set(new.next_inspection_date),
            notes: ActiveValue::Set(new.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        installed.insert(self.db).await
    }

    pub async fn get(
        &self,
        installed_equipment_id: i32,
    ) -> Result<Option<entity::installed_equipment::Model>, DbErr> {
        entity::prelude::InstalledEquipment::find_by_id(installed_equipment_id)
            .one(self.db)
            .await
    }

    /// Filtered page ordered by installation date descending, plus the total
    /// count of rows matching the filters.
    pub async fn list(
        &self,
        filters: InstalledEquipmentFilters,
        limit: u64,
        offset: u64,
    ) -> Result<(u64, Vec<entity::installed_equipment::Model>), DbErr> {
        let mut query = entity::prelude::InstalledEquipment::find();

        if let Some(subscriber_id) = filters.subscriber_id {
            query = query
                .filter(entity::installed_equipment::Column::SubscriberId.eq(subscriber_id));
        }
        if let Some(equipment_type_id) = filters.equipment_type_id {
            query = query.filter(
                entity::installed_equipment::Column::EquipmentTypeId.eq(equipment_type_id),
            );
        }
        if let Some(status_id) = filters.status_id {
            query = query.filter(entity::installed_equipment::Column::StatusId.eq(status_id));
        }
        if let Some(equipment_id) = filters.equipment_id {
            query = query.filter(entity::installed_equipment::Column::EquipmentId.eq(equipment_id));
        }
        if let Some(installation_date) = filters.installation_date {
            query = query.filter(
                entity::installed_equipment::Column::InstallationDate.eq(installation_date),
            );
        }
        if let Some(installation_location) = filters.installation_location {
            query = query.filter(
                entity::installed_equipment::Column::InstallationLocation
                    .contains(&installation_location),
            );
        }

        let count = query.clone().count(self.db).await?;

        let rows = query
            .order_by_desc(entity::installed_equipment::Column::InstallationDate)
            .limit(limit)
            .offset(offset)
            .all(self.db)
            .await?;

        Ok((count, rows))
    }

    /// All of a subscriber's rows, newest installation first.
    pub async fn list_by_subscriber(
        &self,
        subscriber_id: i32,
    ) -> Result<Vec<entity::installed_equipment::Model>, DbErr> {
        entity::prelude::InstalledEquipment::find()
            .filter(entity::installed_equipment::Column::SubscriberId.eq(subscriber_id))
            .order_by_desc(entity::installed_equipment::Column::InstallationDate)
            .all(self.db)
            .await
    }

    /// Per-agreement row counts, `(agreement_id, count)`, for the agreements
    /// that have at least one row.
    pub async fn count_by_agreements(&self) -> Result<Vec<(i32, i64)>, DbErr> {
        entity::prelude::InstalledEquipment::find()
            .select_only()
            .column(entity::installed_equipment::Column::AgreementId)
            .column_as(
                entity::installed_equipment::Column::InstalledEquipmentId.count(),
                "count",
            )
            .group_by(entity::installed_equipment::Column::AgreementId)
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        installed_equipment_id: i32,
        changes: InstalledEquipmentChanges,
    ) -> Result<Option<entity::installed_equipment::Model>, DbErr> {
        let installed = match self.get(installed_equipment_id).await? {
            Some(installed) => installed,
            None => return Ok(None),
        };

        let mut installed = installed.into_active_model();

        if let Some(subscriber_id) = changes.subscriber_id {
            installed.subscriber_id = ActiveValue::Set(subscriber_id);
        }
        if let Some(agreement_id) = changes.agreement_id {
            installed.agreement_id = ActiveValue::Set(agreement_id);
        }
        if let Some(equipment_type_id) = changes.equipment_type_id {
            installed.equipment_type_id = ActiveValue::Set(equipment_type_id);
        }
        if let Some(status_id) = changes.status_id {
            installed.status_id = ActiveValue::Set(Some(status_id));
        }
        if let Some(equipment_id) = changes.equipment_id {
            installed.equipment_id = ActiveValue::Set(equipment_id);
        }
        if let Some(installation_date) = changes.installation_date {
            installed.installation_date = ActiveValue::Set(installation_date);
        }
        if let Some(installation_location) = changes.installation_location {
            installed.installation_location = ActiveValue::Set(Some(installation_location));
        }
        if let Some(last_inspection_date) = changes.last_inspection_date {
            installed.last_inspection_date = ActiveValue::Set(Some(last_inspection_date));
        }
        if let Some(next_inspection_date) = changes.next_inspection_date {
            installed.next_inspection_date = ActiveValue::Set(Some(next_inspection_date));
        }
        if let Some(notes) = changes.notes {
            installed.notes = ActiveValue::Set(Some(notes));
        }
        installed.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(installed.update(self.db).await?))
    }

    /// Deletes an installed-equipment row.
    ///
    /// Returns OK regardless of the row existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, installed_equipment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::InstalledEquipment::delete_by_id(installed_equipment_id)
            .exec(self.db)
            .await
    }
}

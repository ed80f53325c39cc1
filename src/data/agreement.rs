use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

/// Partial agreement update; `None` fields are left untouched.
#[derive(Default)]
pub struct AgreementChanges {
    pub agreement_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub struct AgreementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AgreementRepository<'a> {
    /// Creates a new instance of [`AgreementRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        subscriber_id: i32,
        agreement_number: String,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<entity::agreement::Model, DbErr> {
        let agreement = entity::agreement::ActiveModel {
            subscriber_id: ActiveValue::Set(subscriber_id),
            agreement_number: ActiveValue::Set(agreement_number),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            notes: ActiveValue::Set(notes),
            ..Default::default()
        };

        agreement.insert(self.db).await
    }

    pub async fn get(&self, agreement_id: i32) -> Result<Option<entity::agreement::Model>, DbErr> {
        entity::prelude::Agreement::find_by_id(agreement_id)
            .one(self.db)
            .await
    }

    /// Agreement together with its installed-equipment rows.
    pub async fn get_with_equipment(
        &self,
        agreement_id: i32,
    ) -> Result<
        Option<(
            entity::agreement::Model,
            Vec<entity::installed_equipment::Model>,
        )>,
        DbErr,
    > {
        let agreement = match self.get(agreement_id).await? {
            Some(agreement) => agreement,
            None => return Ok(None),
        };

        let equipment = agreement
            .find_related(entity::prelude::InstalledEquipment)
            .all(self.db)
            .await?;

        Ok(Some((agreement, equipment)))
    }

    /// All agreements, optionally narrowed to one subscriber, newest start
    /// date first.
    pub async fn list(
        &self,
        subscriber_id: Option<i32>,
    ) -> Result<Vec<entity::agreement::Model>, DbErr> {
        let mut query = entity::prelude::Agreement::find();

        if let Some(subscriber_id) = subscriber_id {
            query = query.filter(entity::agreement::Column::SubscriberId.eq(subscriber_id));
        }

        query
            .order_by_desc(entity::agreement::Column::StartDate)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        agreement_id: i32,
        changes: AgreementChanges,
    ) -> Result<Option<entity::agreement::Model>, DbErr> {
        let agreement = match self.get(agreement_id).await? {
            Some(agreement) => agreement,
            None => return Ok(None),
        };

        let mut agreement = agreement.into_active_model();

        if let Some(agreement_number) = changes.agreement_number {
            agreement.agreement_number = ActiveValue::Set(agreement_number);
        }
        if let Some(start_date) = changes.start_date {
            agreement.start_date = ActiveValue::Set(start_date);
        }
        if let Some(end_date) = changes.end_date {
            agreement.end_date = ActiveValue::Set(Some(end_date));
        }
        if let Some(notes) = changes.notes {
            agreement.notes = ActiveValue::Set(Some(notes));
        }

        Ok(Some(agreement.update(self.db).await?))
    }

    /// Deletes an agreement.
    ///
    /// Returns OK regardless of the row existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, agreement_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Agreement::delete_by_id(agreement_id)
            .exec(self.db)
            .await
    }
}

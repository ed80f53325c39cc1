use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

/// Organization fields for create/update; `None` leaves the column untouched
/// on update.
#[derive(Default)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub contact_person: Option<String>,
}

pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        changes: OrganizationChanges,
    ) -> Result<entity::organization::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let organization = entity::organization::ActiveModel {
            name: ActiveValue::Set(name),
            address: ActiveValue::Set(changes.address),
            phone_number: ActiveValue::Set(changes.phone_number),
            contact_person: ActiveValue::Set(changes.contact_person),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        organization.insert(self.db).await
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find()
            .order_by_asc(entity::organization::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get(
        &self,
        organization_id: i32,
    ) -> Result<Option<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find_by_id(organization_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        ids: Vec<i32>,
    ) -> Result<Vec<entity::organization::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Organization::find()
            .filter(entity::organization::Column::OrganizationId.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        organization_id: i32,
        changes: OrganizationChanges,
    ) -> Result<Option<entity::organization::Model>, DbErr> {
        let organization = match self.get(organization_id).await? {
            Some(organization) => organization,
            None => return Ok(None),
        };

        let mut organization = organization.into_active_model();

        if let Some(name) = changes.name {
            organization.name = ActiveValue::Set(name);
        }
        if let Some(address) = changes.address {
            organization.address = ActiveValue::Set(Some(address));
        }
        if let Some(phone_number) = changes.phone_number {
            organization.phone_number = ActiveValue::Set(Some(phone_number));
        }
        if let Some(contact_person) = changes.contact_person {
            organization.contact_person = ActiveValue::Set(Some(contact_person));
        }
        organization.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(organization.update(self.db).await?))
    }

    pub async fn delete(&self, organization_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Organization::delete_by_id(organization_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use gastrack_test_utils::prelude::*;

    use crate::data::organization::{OrganizationChanges, OrganizationRepository};

    /// Expect lookups by unique name to find the created row
    #[tokio::test]
    async fn finds_by_name() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Organization)?;
        let repo = OrganizationRepository::new(&test.db);
        repo.create("Gas Services LLC".to_string(), OrganizationChanges::default())
            .await?;

        let found = repo.find_by_name("Gas Services LLC").await?;

        assert!(found.is_some());

        let missing = repo.find_by_name("Unknown").await?;

        assert!(missing.is_none());

        Ok(())
    }

    /// Expect Error when inserting a duplicate organization name
    #[tokio::test]
    async fn rejects_duplicate_name() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Organization)?;
        let repo = OrganizationRepository::new(&test.db);
        repo.create("Gas Services LLC".to_string(), OrganizationChanges::default())
            .await?;

        let result = repo
            .create("Gas Services LLC".to_string(), OrganizationChanges::default())
            .await;

        assert!(result.is_err());

        Ok(())
    }
}

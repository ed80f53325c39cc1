use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::subscriber::{ActivationEmailStatus, Role};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

/// Fields required to persist a freshly registered subscriber.
pub struct NewSubscriber {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub email: String,
    pub snils: Option<String>,
    pub password_hash: String,
    pub activation_code: String,
    pub activation_code_expires: NaiveDateTime,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Default)]
pub struct SubscriberChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub snils: Option<String>,
    pub address_id: Option<i32>,
}

pub struct SubscriberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriberRepository<'a> {
    /// Creates a new instance of [`SubscriberRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new subscriber, unactivated with role `USER` and a pending
    /// activation email.
    pub async fn create(&self, new: NewSubscriber) -> Result<entity::subscriber::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let subscriber = entity::subscriber::ActiveModel {
            first_name: ActiveValue::Set(new.first_name),
            last_name: ActiveValue::Set(new.last_name),
            middle_name: ActiveValue::Set(new.middle_name),
            date_of_birth: ActiveValue::Set(new.date_of_birth),
            phone_number: ActiveValue::Set(new.phone_number),
            email: ActiveValue::Set(Some(new.email)),
            snils: ActiveValue::Set(new.snils),
            password: ActiveValue::Set(new.password_hash),
            is_activated: ActiveValue::Set(false),
            activation_code: ActiveValue::Set(Some(new.activation_code)),
            activation_code_expires: ActiveValue::Set(Some(new.activation_code_expires)),
            role: ActiveValue::Set(Role::User),
            activation_email_status: ActiveValue::Set(ActivationEmailStatus::Pending),
            address_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        subscriber.insert(self.db).await
    }

    pub async fn get(&self, subscriber_id: i32) -> Result<Option<entity::subscriber::Model>, DbErr> {
        entity::prelude::Subscriber::find_by_id(subscriber_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::subscriber::Model>, DbErr> {
        entity::prelude::Subscriber::find()
            .filter(entity::subscriber::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_activation_code(
        &self,
        activation_code: &str,
    ) -> Result<Option<entity::subscriber::Model>, DbErr> {
        entity::prelude::Subscriber::find()
            .filter(entity::subscriber::Column::ActivationCode.eq(activation_code))
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, ids: Vec<i32>) -> Result<Vec<entity::subscriber::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Subscriber::find()
            .filter(entity::subscriber::Column::SubscriberId.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::subscriber::Model>, DbErr> {
        entity::prelude::Subscriber::find()
            .order_by_asc(entity::subscriber::Column::SubscriberId)
            .all(self.db)
            .await
    }

    /// Applies a partial profile update, returning the updated row or `None`
    /// when the subscriber does not exist.
    pub async fn update_profile(
        &self,
        subscriber_id: i32,
        changes: SubscriberChanges,
    ) -> Result<Option<entity::subscriber::Model>, DbErr> {
        let subscriber = match self.get(subscriber_id).await? {
            Some(subscriber) => subscriber,
            None => return Ok(None),
        };

        let mut subscriber = subscriber.into_active_model();

        if let Some(first_name) = changes.first_name {
            subscriber.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            subscriber.last_name = ActiveValue::Set(last_name);
        }
        if let Some(middle_name) = changes.middle_name {
            subscriber.middle_name = ActiveValue::Set(Some(middle_name));
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            subscriber.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(phone_number) = changes.phone_number {
            subscriber.phone_number = ActiveValue::Set(Some(phone_number));
        }
        if let Some(email) = changes.email {
            subscriber.email = ActiveValue::Set(Some(email));
        }
        if let Some(snils) = changes.snils {
            subscriber.snils = ActiveValue::Set(Some(snils));
        }
        if let Some(address_id) = changes.address_id {
            subscriber.address_id = ActiveValue::Set(Some(address_id));
        }
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(subscriber.update(self.db).await?))
    }

    pub async fn update_password(
        &self,
        subscriber_id: i32,
        password_hash: String,
    ) -> Result<Option<entity::subscriber::Model>, DbErr> {
        let subscriber = match self.get(subscriber_id).await? {
            Some(subscriber) => subscriber,
            None => return Ok(None),
        };

        let mut subscriber = subscriber.into_active_model();
        subscriber.password = ActiveValue::Set(password_hash);
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(subscriber.update(self.db).await?))
    }

    /// Stores a fresh activation code and expiry and resets the email status
    /// to pending.
    pub async fn set_activation_code(
        &self,
        subscriber: entity::subscriber::Model,
        activation_code: String,
        expires: NaiveDateTime,
    ) -> Result<entity::subscriber::Model, DbErr> {
        let mut subscriber = subscriber.into_active_model();
        subscriber.activation_code = ActiveValue::Set(Some(activation_code));
        subscriber.activation_code_expires = ActiveValue::Set(Some(expires));
        subscriber.activation_email_status = ActiveValue::Set(ActivationEmailStatus::Pending);
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        subscriber.update(self.db).await
    }

    pub async fn mark_email_status(
        &self,
        subscriber_id: i32,
        status: ActivationEmailStatus,
    ) -> Result<(), DbErr> {
        let subscriber = match self.get(subscriber_id).await? {
            Some(subscriber) => subscriber,
            None => return Ok(()),
        };

        let mut subscriber = subscriber.into_active_model();
        subscriber.activation_email_status = ActiveValue::Set(status);
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        subscriber.update(self.db).await?;

        Ok(())
    }

    /// Marks the subscriber activated and clears the single-use code fields.
    pub async fn activate(
        &self,
        subscriber: entity::subscriber::Model,
    ) -> Result<entity::subscriber::Model, DbErr> {
        let mut subscriber = subscriber.into_active_model();
        subscriber.is_activated = ActiveValue::Set(true);
        subscriber.activation_code = ActiveValue::Set(None);
        subscriber.activation_code_expires = ActiveValue::Set(None);
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        subscriber.update(self.db).await
    }

    /// Clears an expired code so it cannot be retried.
    pub async fn clear_activation_code(
        &self,
        subscriber: entity::subscriber::Model,
    ) -> Result<entity::subscriber::Model, DbErr> {
        let mut subscriber = subscriber.into_active_model();
        subscriber.activation_code = ActiveValue::Set(None);
        subscriber.activation_code_expires = ActiveValue::Set(None);
        subscriber.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        subscriber.update(self.db).await
    }

    /// Deletes a subscriber.
    ///
    /// Returns OK regardless of the row existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, subscriber_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Subscriber::delete_by_id(subscriber_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use gastrack_test_utils::prelude::*;

    use crate::data::subscriber::{NewSubscriber, SubscriberChanges, SubscriberRepository};

    fn new_subscriber(email: &str) -> NewSubscriber {
        NewSubscriber {
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            middle_name: None,
            date_of_birth: None,
            phone_number: None,
            email: email.to_string(),
            snils: None,
            password_hash: "$argon2id$test".to_string(),
            activation_code: "code-123".to_string(),
            activation_code_expires: Utc::now().naive_utc() + Duration::hours(24),
        }
    }

    mod create {
        use entity::subscriber::{ActivationEmailStatus, Role};

        use super::*;

        /// Expect new subscribers to start unactivated with role USER and a
        /// pending activation email
        #[tokio::test]
        async fn creates_unactivated_user() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);

            let created = repo.create(new_subscriber("ivan@example.com")).await?;

            assert!(!created.is_activated);
            assert_eq!(created.role, Role::User);
            assert_eq!(
                created.activation_email_status,
                ActivationEmailStatus::Pending
            );
            assert_eq!(created.activation_code.as_deref(), Some("code-123"));

            Ok(())
        }

        /// Expect Error when required tables are missing
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;
            let repo = SubscriberRepository::new(&test.db);

            let result = repo.create(new_subscriber("ivan@example.com")).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_by_email {
        use super::*;

        #[tokio::test]
        async fn finds_existing_subscriber() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);
            repo.create(new_subscriber("ivan@example.com")).await?;

            let found = repo.find_by_email("ivan@example.com").await?;

            assert!(found.is_some());

            Ok(())
        }

        #[tokio::test]
        async fn returns_none_for_unknown_email() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);

            let found = repo.find_by_email("nobody@example.com").await?;

            assert!(found.is_none());

            Ok(())
        }
    }

    mod activate {
        use super::*;

        /// Expect activation to set the flag and clear both code fields
        #[tokio::test]
        async fn clears_code_fields() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);
            let created = repo.create(new_subscriber("ivan@example.com")).await?;

            let activated = repo.activate(created).await?;

            assert!(activated.is_activated);
            assert!(activated.activation_code.is_none());
            assert!(activated.activation_code_expires.is_none());

            Ok(())
        }
    }

    mod update_profile {
        use super::*;

        /// Expect provided fields to be applied and absent fields untouched
        #[tokio::test]
        async fn applies_partial_changes() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);
            let created = repo.create(new_subscriber("ivan@example.com")).await?;

            let changes = SubscriberChanges {
                phone_number: Some("+71234567890".to_string()),
                ..Default::default()
            };
            let updated = repo.update_profile(created.subscriber_id, changes).await?;

            let updated = updated.unwrap();
            assert_eq!(updated.phone_number.as_deref(), Some("+71234567890"));
            assert_eq!(updated.first_name, "Ivan");

            Ok(())
        }

        #[tokio::test]
        async fn returns_none_for_missing_subscriber() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);

            let updated = repo.update_profile(1, SubscriberChanges::default()).await?;

            assert!(updated.is_none());

            Ok(())
        }
    }

    mod delete {
        use super::*;

        #[tokio::test]
        async fn deletes_existing_subscriber() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);
            let created = repo.create(new_subscriber("ivan@example.com")).await?;

            let result = repo.delete(created.subscriber_id).await?;

            assert_eq!(result.rows_affected, 1);

            Ok(())
        }

        #[tokio::test]
        async fn affects_no_rows_for_missing_subscriber() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Subscriber)?;
            let repo = SubscriberRepository::new(&test.db);

            let result = repo.delete(42).await?;

            assert_eq!(result.rows_affected, 0);

            Ok(())
        }
    }
}

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Address fields as accepted by create/update; `None` leaves the column
/// untouched on update.
#[derive(Default)]
pub struct AddressChanges {
    pub region: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub apartment_number: Option<String>,
    pub zip_code: Option<String>,
}

pub struct AddressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AddressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        changes: AddressChanges,
        zip_code: String,
    ) -> Result<entity::address::Model, DbErr> {
        let address = entity::address::ActiveModel {
            region: ActiveValue::Set(changes.region),
            district: ActiveValue::Set(changes.district),
            city: ActiveValue::Set(changes.city),
            street: ActiveValue::Set(changes.street),
            house_number: ActiveValue::Set(changes.house_number),
            apartment_number: ActiveValue::Set(changes.apartment_number),
            zip_code: ActiveValue::Set(zip_code),
            ..Default::default()
        };

        address.insert(self.db).await
    }

    /// Filtered page of addresses ordered city, street, house number, plus
    /// the total count of rows matching the filters.
    pub async fn list(
        &self,
        city: Option<&str>,
        street: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Result<(u64, Vec<entity::address::Model>), DbErr> {
        let mut query = entity::prelude::Address::find();

        if let Some(city) = city {
            query = query.filter(entity::address::Column::City.eq(city));
        }
        if let Some(street) = street {
            query = query.filter(entity::address::Column::Street.eq(street));
        }

        let count = query.clone().count(self.db).await?;

        let rows = query
            .order_by_asc(entity::address::Column::City)
            .order_by_asc(entity::address::Column::Street)
            .order_by_asc(entity::address::Column::HouseNumber)
            .limit(limit)
            .offset(offset)
            .all(self.db)
            .await?;

        Ok((count, rows))
    }

    pub async fn get(&self, address_id: i32) -> Result<Option<entity::address::Model>, DbErr> {
        entity::prelude::Address::find_by_id(address_id)
            .one(self.db)
            .await
    }

    pub async fn update(
        &self,
        address_id: i32,
        changes: AddressChanges,
    ) -> Result<Option<entity::address::Model>, DbErr> {
        let address = match self.get(address_id).await? {
            Some(address) => address,
            None => return Ok(None),
        };

        let mut address = address.into_active_model();

        if let Some(region) = changes.region {
            address.region = ActiveValue::Set(Some(region));
        }
        if let Some(district) = changes.district {
            address.district = ActiveValue::Set(Some(district));
        }
        if let Some(city) = changes.city {
            address.city = ActiveValue::Set(Some(city));
        }
        if let Some(street) = changes.street {
            address.street = ActiveValue::Set(Some(street));
        }
        if let Some(house_number) = changes.house_number {
            address.house_number = ActiveValue::Set(Some(house_number));
        }
        if let Some(apartment_number) = changes.apartment_number {
            address.apartment_number = ActiveValue::Set(Some(apartment_number));
        }
        if let Some(zip_code) = changes.zip_code {
            address.zip_code = ActiveValue::Set(zip_code);
        }

        Ok(Some(address.update(self.db).await?))
    }

    pub async fn delete(&self, address_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Address::delete_by_id(address_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use gastrack_test_utils::prelude::*;

    use crate::data::address::{AddressChanges, AddressRepository};

    async fn insert(
        repo: &AddressRepository<'_>,
        city: &str,
        street: &str,
    ) -> Result<entity::address::Model, TestError> {
        let changes = AddressChanges {
            city: Some(city.to_string()),
            street: Some(street.to_string()),
            house_number: Some("1".to_string()),
            ..Default::default()
        };

        Ok(repo.create(changes, "170100".to_string()).await?)
    }

    /// Expect the city filter to narrow both rows and count
    #[tokio::test]
    async fn list_filters_by_city() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Address)?;
        let repo = AddressRepository::new(&test.db);
        insert(&repo, "Tver", "Sovetskaya").await?;
        insert(&repo, "Tver", "Gagarina").await?;
        insert(&repo, "Moscow", "Arbat").await?;

        let (count, rows) = repo.list(Some("Tver"), None, 10, 0).await?;

        assert_eq!(count, 2);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|a| a.city.as_deref() == Some("Tver")));

        Ok(())
    }

    /// Expect pagination to cap the page while reporting the full count
    #[tokio::test]
    async fn list_paginates() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Address)?;
        let repo = AddressRepository::new(&test.db);
        for street in ["A", "B", "C"] {
            insert(&repo, "Tver", street).await?;
        }

        let (count, rows) = repo.list(None, None, 2, 0).await?;

        assert_eq!(count, 3);
        assert_eq!(rows.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_returns_none_for_missing_row() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Address)?;
        let repo = AddressRepository::new(&test.db);

        let updated = repo.update(1, AddressChanges::default()).await?;

        assert!(updated.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_affects_no_rows_for_missing_row() -> Result<(), TestError> {
        let test = test_setup_with_tables!(entity::prelude::Address)?;
        let repo = AddressRepository::new(&test.db);

        let result = repo.delete(7).await?;

        assert_eq!(result.rows_affected, 0);

        Ok(())
    }
}

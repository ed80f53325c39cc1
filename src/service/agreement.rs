//! Agreement reads that combine the agreement rows with their
//! installed-equipment line items.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    data::{installed_equipment::InstalledEquipmentRepository, AgreementRepository},
    error::{ApiError, Error},
    model::agreement::{AgreementDetailDto, AgreementDto},
    service::installed_equipment::InstalledEquipmentService,
};

pub struct AgreementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AgreementService<'a> {
    /// Creates a new instance of [`AgreementService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Agreements (optionally one subscriber's), newest start date first,
    /// each with its computed equipment count.
    pub async fn list(&self, subscriber_id: Option<i32>) -> Result<Vec<AgreementDto>, Error> {
        let agreements = AgreementRepository::new(self.db).list(subscriber_id).await?;

        let counts: HashMap<i32, i64> = InstalledEquipmentRepository::new(self.db)
            .count_by_agreements()
            .await?
            .into_iter()
            .collect();

        Ok(agreements
            .iter()
            .map(|agreement| {
                let count = counts.get(&agreement.agreement_id).copied().unwrap_or(0);
                AgreementDto::from_model(agreement, count)
            })
            .collect())
    }

    /// One agreement with its line items, each joined with equipment type,
    /// status, and catalog entry.
    pub async fn get_detail(&self, agreement_id: i32) -> Result<AgreementDetailDto, Error> {
        let (agreement, rows) = AgreementRepository::new(self.db)
            .get_with_equipment(agreement_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("Agreement with this ID was not found.".to_string())
            })?;

        let installed_equipment = InstalledEquipmentService::new(self.db)
            .load_details(rows, false, false)
            .await?;

        Ok(AgreementDetailDto {
            agreement_id: agreement.agreement_id,
            subscriber_id: agreement.subscriber_id,
            agreement_number: agreement.agreement_number,
            start_date: agreement.start_date,
            end_date: agreement.end_date,
            notes: agreement.notes,
            installed_equipment,
        })
    }
}

#[cfg(test)]
mod tests {
    use gastrack_test_utils::prelude::*;

    use crate::{
        error::{ApiError, Error},
        service::agreement::AgreementService,
    };

    /// Expect each agreement to carry its own equipment count, zero included
    #[tokio::test]
    async fn list_merges_equipment_counts() -> Result<(), TestError> {
        let test = test_setup_with_all_tables!()?;
        let subscriber =
            fixtures::insert_subscriber(&test.db, "ivan@example.com", "password-123", true).await?;
        let with_equipment = fixtures::insert_agreement(
            &test.db,
            subscriber.subscriber_id,
            "AG-1",
            fixtures::past_date(),
        )
        .await?;
        let without_equipment = fixtures::insert_agreement(
            &test.db,
            subscriber.subscriber_id,
            "AG-2",
            fixtures::past_date(),
        )
        .await?;
        let equipment_type = fixtures::insert_equipment_type(&test.db, "Meter").await?;
        let equipment = fixtures::insert_equipment(&test.db, "G4 meter").await?;
        fixtures::insert_installed_equipment(
            &test.db,
            subscriber.subscriber_id,
            with_equipment.agreement_id,
            equipment_type.equipment_type_id,
            equipment.equipment_id,
        )
        .await?;

        let service = AgreementService::new(&test.db);
        let agreements = service.list(None).await.unwrap();

        assert_eq!(agreements.len(), 2);
        let by_id: std::collections::HashMap<i32, i64> = agreements
            .iter()
            .map(|a| (a.agreement_id, a.equipment_count))
            .collect();
        assert_eq!(by_id[&with_equipment.agreement_id], 1);
        assert_eq!(by_id[&without_equipment.agreement_id], 0);

        Ok(())
    }

    /// Expect the detail view to nest line items with their reference data
    #[tokio::test]
    async fn detail_nests_line_items() -> Result<(), TestError> {
        let test = test_setup_with_all_tables!()?;
        let subscriber =
            fixtures::insert_subscriber(&test.db, "ivan@example.com", "password-123", true).await?;
        let agreement = fixtures::insert_agreement(
            &test.db,
            subscriber.subscriber_id,
            "AG-1",
            fixtures::past_date(),
        )
        .await?;
        let equipment_type = fixtures::insert_equipment_type(&test.db, "Meter").await?;
        let equipment = fixtures::insert_equipment(&test.db, "G4 meter").await?;
        fixtures::insert_installed_equipment(
            &test.db,
            subscriber.subscriber_id,
            agreement.agreement_id,
            equipment_type.equipment_type_id,
            equipment.equipment_id,
        )
        .await?;

        let service = AgreementService::new(&test.db);
        let detail = service.get_detail(agreement.agreement_id).await.unwrap();

        assert_eq!(detail.agreement_number, "AG-1");
        assert_eq!(detail.installed_equipment.len(), 1);
        assert_eq!(
            detail.installed_equipment[0]
                .equipment_type
                .as_ref()
                .map(|t| t.name.as_str()),
            Some("Meter")
        );

        Ok(())
    }

    /// Expect 404 for a missing agreement
    #[tokio::test]
    async fn detail_returns_not_found() -> Result<(), TestError> {
        let test = test_setup_with_all_tables!()?;
        let service = AgreementService::new(&test.db);

        let result = service.get_detail(42).await;

        assert!(matches!(
            result,
            Err(Error::ApiError(ApiError::NotFound(_)))
        ));

        Ok(())
    }
}

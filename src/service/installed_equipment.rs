//! Installed-equipment operations: batch create/update and the joined reads
//! behind the list/detail endpoints.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        installed_equipment::{
            InstalledEquipmentChanges, InstalledEquipmentFilters, InstalledEquipmentRepository,
            NewInstalledEquipment,
        },
        EquipmentRepository, EquipmentStatusRepository, EquipmentTypeRepository,
        OrganizationRepository, SubscriberRepository, VerificationRepository,
    },
    error::{ApiError, Error},
    model::{
        equipment::{EquipmentDto, EquipmentStatusDto, EquipmentTypeDto},
        installed_equipment::{
            BatchUpdateItemDto, CreateInstalledEquipmentDto, InstalledEquipmentDetailDto,
            UpdateInstalledEquipmentDto,
        },
        subscriber::SubscriberDto,
        verification::VerificationDto,
    },
};

pub struct InstalledEquipmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InstalledEquipmentService<'a> {
    /// Creates a new instance of [`InstalledEquipmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a batch of rows inside one transaction.
    ///
    /// The whole batch is rejected up front when it is empty or any item
    /// lacks a required field, and a mid-batch insert failure rolls back the
    /// rows created before it.
    pub async fn create_batch(
        &self,
        items: Vec<CreateInstalledEquipmentDto>,
    ) -> Result<Vec<entity::installed_equipment::Model>, Error> {
        if items.is_empty() {
            return Err(ApiError::BadRequest("No equipment to add.".to_string()).into());
        }

        for item in &items {
            if item.subscriber_id.is_none() {
                return Err(ApiError::BadRequest(
                    "subscriber_id is required in every equipment item".to_string(),
                )
                .into());
            }
        }

        let mut prepared = Vec::with_capacity(items.len());
        for item in items {
            prepared.push(require_new(item)?);
        }

        let txn = self.db.begin().await?;
        let repo = InstalledEquipmentRepository::new(&txn);

        let mut created = Vec::with_capacity(prepared.len());
        for new in prepared {
            created.push(repo.create(new).await?);
        }

        txn.commit().await?;

        Ok(created)
    }

    /// Applies a batch of partial updates.
    ///
    /// Items without `installed_equipment_id` are skipped with a warning and
    /// excluded from the returned set, as are ids matching no row.
    pub async fn update_batch(
        &self,
        items: Vec<BatchUpdateItemDto>,
    ) -> Result<Vec<entity::installed_equipment::Model>, Error> {
        if items.is_empty() {
            return Err(ApiError::BadRequest("No data to update.".to_string()).into());
        }

        let repo = InstalledEquipmentRepository::new(self.db);
        let mut updated = Vec::new();

        for (position, item) in items.into_iter().enumerate() {
            let installed_equipment_id = match item.installed_equipment_id {
                Some(id) => id,
                None => {
                    tracing::warn!(
                        position,
                        "skipping batch update item without installed_equipment_id"
                    );
                    continue;
                }
            };

            match repo
                .update(installed_equipment_id, to_changes(item.changes))
                .await?
            {
                Some(model) => updated.push(model),
                None => {
                    tracing::warn!(
                        installed_equipment_id,
                        "no installed equipment found to update"
                    );
                }
            }
        }

        Ok(updated)
    }

    /// Filtered page with reference data, subscriber, and verifications
    /// joined in.
    pub async fn list(
        &self,
        filters: InstalledEquipmentFilters,
        limit: u64,
        offset: u64,
    ) -> Result<(u64, Vec<InstalledEquipmentDetailDto>), Error> {
        let repo = InstalledEquipmentRepository::new(self.db);
        let (count, rows) = repo.list(filters, limit, offset).await?;
        let details = self.load_details(rows, true, true).await?;

        Ok((count, details))
    }

    pub async fn get_detail(
        &self,
        installed_equipment_id: i32,
    ) -> Result<InstalledEquipmentDetailDto, Error> {
        let repo = InstalledEquipmentRepository::new(self.db);

        let row = repo.get(installed_equipment_id).await?.ok_or_else(|| {
            ApiError::NotFound("Installed equipment with this ID was not found.".to_string())
        })?;

        let mut details = self.load_details(vec![row], true, true).await?;

        Ok(details.remove(0))
    }

    /// A subscriber's equipment with reference data and verifications; 404
    /// when the subscriber has none.
    pub async fn by_subscriber(
        &self,
        subscriber_id: i32,
    ) -> Result<Vec<InstalledEquipmentDetailDto>, Error> {
        let repo = InstalledEquipmentRepository::new(self.db);
        let rows = repo.list_by_subscriber(subscriber_id).await?;

        if rows.is_empty() {
            return Err(
                ApiError::NotFound("No agreement found for this subscriber.".to_string()).into(),
            );
        }

        self.load_details(rows, false, true).await
    }

    /// Joins reference data onto the rows with batched lookups, preserving
    /// row order.
    pub(crate) async fn load_details(
        &self,
        rows: Vec<entity::installed_equipment::Model>,
        include_subscriber: bool,
        include_verifications: bool,
    ) -> Result<Vec<InstalledEquipmentDetailDto>, Error> {
        let type_ids: BTreeSet<i32> = rows.iter().map(|row| row.equipment_type_id).collect();
        let status_ids: BTreeSet<i32> = rows.iter().filter_map(|row| row.status_id).collect();
        let equipment_ids: BTreeSet<i32> = rows.iter().map(|row| row.equipment_id).collect();

        let types: HashMap<i32, entity::equipment_type::Model> =
            EquipmentTypeRepository::new(self.db)
                .get_many(type_ids.into_iter().collect())
                .await?
                .into_iter()
                .map(|model| (model.equipment_type_id, model))
                .collect();

        let statuses: HashMap<i32, entity::equipment_status::Model> =
            EquipmentStatusRepository::new(self.db)
                .get_many(status_ids.into_iter().collect())
                .await?
                .into_iter()
                .map(|model| (model.status_id, model))
                .collect();

        let equipment: HashMap<i32, entity::equipment::Model> = EquipmentRepository::new(self.db)
            .get_many(equipment_ids.into_iter().collect())
            .await?
            .into_iter()
            .map(|model| (model.equipment_id, model))
            .collect();

        let subscribers: HashMap<i32, entity::subscriber::Model> = if include_subscriber {
            let subscriber_ids: BTreeSet<i32> = rows.iter().map(|row| row.subscriber_id).collect();

            SubscriberRepository::new(self.db)
                .get_many(subscriber_ids.into_iter().collect())
                .await?
                .into_iter()
                .map(|model| (model.subscriber_id, model))
                .collect()
        } else {
            HashMap::new()
        };

        let mut verifications: HashMap<i32, Vec<VerificationDto>> = HashMap::new();
        if include_verifications {
            let row_ids: Vec<i32> = rows.iter().map(|row| row.installed_equipment_id).collect();
            let verification_rows = VerificationRepository::new(self.db)
                .list_by_installed_equipment(row_ids)
                .await?;

            let organization_ids: BTreeSet<i32> = verification_rows
                .iter()
                .filter_map(|row| row.organization_id)
                .collect();
            let organizations: HashMap<i32, entity::organization::Model> =
                OrganizationRepository::new(self.db)
                    .get_many(organization_ids.into_iter().collect())
                    .await?
                    .into_iter()
                    .map(|model| (model.organization_id, model))
                    .collect();

            for row in verification_rows {
                let Some(installed_equipment_id) = row.installed_equipment_id else {
                    continue;
                };
                let organization = row
                    .organization_id
                    .and_then(|id| organizations.get(&id));
                verifications
                    .entry(installed_equipment_id)
                    .or_default()
                    .push(VerificationDto::from_model(&row, organization));
            }
        }

        let details = rows
            .into_iter()
            .map(|row| InstalledEquipmentDetailDto {
                installed_equipment_id: row.installed_equipment_id,
                subscriber_id: row.subscriber_id,
                agreement_id: row.agreement_id,
                installation_date: row.installation_date,
                installation_location: row.installation_location,
                last_inspection_date: row.last_inspection_date,
                next_inspection_date: row.next_inspection_date,
                notes: row.notes,
                equipment_type: types.get(&row.equipment_type_id).map(EquipmentTypeDto::from),
                equipment_status: row
                    .status_id
                    .and_then(|id| statuses.get(&id))
                    .map(EquipmentStatusDto::from),
                equipment: equipment.get(&row.equipment_id).map(EquipmentDto::from),
                subscriber: subscribers
                    .get(&row.subscriber_id)
                    .map(SubscriberDto::from),
                verifications: verifications
                    .remove(&row.installed_equipment_id)
                    .unwrap_or_default(),
            })
            .collect();

        Ok(details)
    }
}

fn require_new(item: CreateInstalledEquipmentDto) -> Result<NewInstalledEquipment, Error> {
    Ok(NewInstalledEquipment {
        subscriber_id: require_field(item.subscriber_id, "subscriber_id")?,
        agreement_id: require_field(item.agreement_id, "agreement_id")?,
        equipment_type_id: require_field(item.equipment_type_id, "equipment_type_id")?,
        status_id: item.status_id,
        equipment_id: require_field(item.equipment_id, "equipment_id")?,
        installation_date: require_field(item.installation_date, "installation_date")?,
        installation_location: item.installation_location,
        last_inspection_date: item.last_inspection_date,
        next_inspection_date: item.next_inspection_date,
        notes: item.notes,
    })
}

fn require_field<T>(value: Option<T>, field: &str) -> Result<T, Error> {
    value.ok_or_else(|| {
        ApiError::BadRequest(format!("{} is required in every equipment item", field)).into()
    })
}

fn to_changes(dto: UpdateInstalledEquipmentDto) -> InstalledEquipmentChanges {
    InstalledEquipmentChanges {
        subscriber_id: dto.subscriber_id,
        agreement_id: dto.agreement_id,
        equipment_type_id: dto.equipment_type_id,
        status_id: dto.status_id,
        equipment_id: dto.equipment_id,
        installation_date: dto.installation_date,
        installation_location: dto.installation_location,
        last_inspection_date: dto.last_inspection_date,
        next_inspection_date: dto.next_inspection_date,
        notes: dto.notes,
    }
}

#[cfg(test)]
mod tests {
    use gastrack_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use crate::{
        error::{ApiError, Error},
        model::installed_equipment::{
            BatchUpdateItemDto, CreateInstalledEquipmentDto, UpdateInstalledEquipmentDto,
        },
        service::installed_equipment::InstalledEquipmentService,
    };

    struct Graph {
        subscriber: entity::subscriber::Model,
        agreement: entity::agreement::Model,
        equipment_type: entity::equipment_type::Model,
        equipment: entity::equipment::Model,
    }

    async fn setup_graph(test: &TestSetup) -> Result<Graph, TestError> {
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

        Ok(Graph {
            subscriber,
            agreement,
            equipment_type,
            equipment,
        })
    }

    fn create_item(graph: &Graph) -> CreateInstalledEquipmentDto {
        CreateInstalledEquipmentDto {
            subscriber_id: Some(graph.subscriber.subscriber_id),
            agreement_id: Some(graph.agreement.agreement_id),
            equipment_type_id: Some(graph.equipment_type.equipment_type_id),
            status_id: None,
            equipment_id: Some(graph.equipment.equipment_id),
            installation_date: Some(fixtures::past_date()),
            installation_location: Some("Kitchen".to_string()),
            last_inspection_date: None,
            next_inspection_date: None,
            notes: None,
        }
    }

    mod create_batch {
        use super::*;

        /// Expect every item persisted and returned
        #[tokio::test]
        async fn creates_all_items() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let graph = setup_graph(&test).await?;
            let service = InstalledEquipmentService::new(&test.db);

            let created = service
                .create_batch(vec![create_item(&graph), create_item(&graph)])
                .await
                .unwrap();

            assert_eq!(created.len(), 2);

            let rows = entity::prelude::InstalledEquipment::find()
                .all(&test.db)
                .await?;
            assert_eq!(rows.len(), 2);

            Ok(())
        }

        /// Expect an empty batch to be rejected outright
        #[tokio::test]
        async fn rejects_empty_batch() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let service = InstalledEquipmentService::new(&test.db);

            let result = service.create_batch(Vec::new()).await;

            assert!(matches!(
                result,
                Err(Error::ApiError(ApiError::BadRequest(_)))
            ));

            Ok(())
        }

        /// Expect the whole batch to be rejected when one item lacks
        /// subscriber_id, with nothing persisted
        #[tokio::test]
        async fn rejects_batch_with_missing_subscriber_id() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let graph = setup_graph(&test).await?;
            let service = InstalledEquipmentService::new(&test.db);

            let mut bad = create_item(&graph);
            bad.subscriber_id = None;

            let result = service
                .create_batch(vec![create_item(&graph), bad])
                .await;

            assert!(matches!(
                result,
                Err(Error::ApiError(ApiError::BadRequest(_)))
            ));

            let rows = entity::prelude::InstalledEquipment::find()
                .all(&test.db)
                .await?;
            assert!(rows.is_empty());

            Ok(())
        }

        /// Expect a mid-batch insert failure to roll back the earlier rows
        #[tokio::test]
        async fn rolls_back_on_mid_batch_failure() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let graph = setup_graph(&test).await?;
            let service = InstalledEquipmentService::new(&test.db);

            let mut broken = create_item(&graph);
            // References no agreement row, so the insert violates the
            // foreign key.
            broken.agreement_id = Some(graph.agreement.agreement_id + 100);

            let result = service
                .create_batch(vec![create_item(&graph), broken])
                .await;

            assert!(result.is_err());

            let rows = entity::prelude::InstalledEquipment::find()
                .all(&test.db)
                .await?;
            assert!(rows.is_empty());

            Ok(())
        }
    }

    mod update_batch {
        use super::*;

        /// Expect an item without an id to be skipped while the valid item
        /// is updated and returned
        #[tokio::test]
        async fn skips_items_without_id() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let graph = setup_graph(&test).await?;
            let row = fixtures::insert_installed_equipment(
                &test.db,
                graph.subscriber.subscriber_id,
                graph.agreement.agreement_id,
                graph.equipment_type.equipment_type_id,
                graph.equipment.equipment_id,
            )
            .await?;
            let service = InstalledEquipmentService::new(&test.db);

            let valid = BatchUpdateItemDto {
                installed_equipment_id: Some(row.installed_equipment_id),
                changes: UpdateInstalledEquipmentDto {
                    notes: Some("updated".to_string()),
                    ..Default::default()
                },
            };
            let missing_id = BatchUpdateItemDto {
                installed_equipment_id: None,
                changes: UpdateInstalledEquipmentDto {
                    notes: Some("ignored".to_string()),
                    ..Default::default()
                },
            };

            let updated = service.update_batch(vec![missing_id, valid]).await.unwrap();

            assert_eq!(updated.len(), 1);
            assert_eq!(
                updated[0].installed_equipment_id,
                row.installed_equipment_id
            );
            assert_eq!(updated[0].notes.as_deref(), Some("updated"));

            Ok(())
        }

        /// Expect unknown ids to be skipped rather than failing the batch
        #[tokio::test]
        async fn skips_unknown_ids() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let service = InstalledEquipmentService::new(&test.db);

            let unknown = BatchUpdateItemDto {
                installed_equipment_id: Some(999),
                changes: UpdateInstalledEquipmentDto::default(),
            };

            let updated = service.update_batch(vec![unknown]).await.unwrap();

            assert!(updated.is_empty());

            Ok(())
        }

        /// Expect an empty batch to be rejected
        #[tokio::test]
        async fn rejects_empty_batch() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let service = InstalledEquipmentService::new(&test.db);

            let result = service.update_batch(Vec::new()).await;

            assert!(matches!(
                result,
                Err(Error::ApiError(ApiError::BadRequest(_)))
            ));

            Ok(())
        }
    }

    mod detail_loading {
        use super::*;

        /// Expect reference data, subscriber, and verifications joined onto
        /// the row
        #[tokio::test]
        async fn joins_reference_data() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let graph = setup_graph(&test).await?;
            let row = fixtures::insert_installed_equipment(
                &test.db,
                graph.subscriber.subscriber_id,
                graph.agreement.agreement_id,
                graph.equipment_type.equipment_type_id,
                graph.equipment.equipment_id,
            )
            .await?;
            let organization =
                fixtures::insert_organization(&test.db, "Gas Services LLC").await?;
            fixtures::insert_verification(
                &test.db,
                row.installed_equipment_id,
                organization.organization_id,
            )
            .await?;

            let service = InstalledEquipmentService::new(&test.db);
            let detail = service.get_detail(row.installed_equipment_id).await.unwrap();

            assert_eq!(
                detail.equipment_type.as_ref().map(|t| t.name.as_str()),
                Some("Meter")
            );
            assert_eq!(
                detail.equipment.as_ref().map(|e| e.name.as_str()),
                Some("G4 meter")
            );
            assert_eq!(
                detail.subscriber.as_ref().map(|s| s.subscriber_id),
                Some(graph.subscriber.subscriber_id)
            );
            assert_eq!(detail.verifications.len(), 1);
            assert_eq!(
                detail.verifications[0]
                    .organization
                    .as_ref()
                    .map(|o| o.name.as_str()),
                Some("Gas Services LLC")
            );

            Ok(())
        }

        /// Expect 404 for an id with no row
        #[tokio::test]
        async fn get_detail_returns_not_found() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let service = InstalledEquipmentService::new(&test.db);

            let result = service.get_detail(404).await;

            assert!(matches!(
                result,
                Err(Error::ApiError(ApiError::NotFound(_)))
            ));

            Ok(())
        }

        /// Expect 404 when a subscriber has no installed equipment
        #[tokio::test]
        async fn by_subscriber_returns_not_found_when_empty() -> Result<(), TestError> {
            let test = test_setup_with_all_tables!()?;
            let service = InstalledEquipmentService::new(&test.db);

            let result = service.by_subscriber(1).await;

            assert!(matches!(
                result,
                Err(Error::ApiError(ApiError::NotFound(_)))
            ));

            Ok(())
        }
    }
}

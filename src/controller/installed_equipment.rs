//! Installed-equipment endpoints, including the bulk create/update routes
//! used by the agreement editor.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::extract::ApiJson,
    data::installed_equipment::{InstalledEquipmentFilters, InstalledEquipmentRepository},
    error::{ApiError, Error},
    model::{
        api::MessageDto,
        app::AppState,
        installed_equipment::{
            BatchCreateDto, BatchResultDto, BatchUpdateDto, CreateInstalledEquipmentDto,
            InstalledEquipmentDetailDto, InstalledEquipmentDto, InstalledEquipmentListDto,
            InstalledEquipmentListQuery, SubscriberEquipmentDto, UpdateInstalledEquipmentDto,
        },
    },
    service::installed_equipment::InstalledEquipmentService,
};

pub static INSTALLED_EQUIPMENT_TAG: &str = "installed-equipment";

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Create one installed-equipment record
#[utoipa::path(
    post,
    path = "/api/installed-equipment/",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 201, description = "Record created", body = InstalledEquipmentDto),
        (status = 400, description = "Missing required fields or invalid references", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreateInstalledEquipmentDto>,
) -> Result<impl IntoResponse, Error> {
    let created = InstalledEquipmentService::new(&state.db)
        .create_batch(vec![dto])
        .await
        .map_err(single_item_error)?
        .remove(0);

    Ok((
        StatusCode::CREATED,
        Json(InstalledEquipmentDto::from(&created)),
    ))
}

/// List installed equipment with filters and pagination
#[utoipa::path(
    get,
    path = "/api/installed-equipment/",
    tag = INSTALLED_EQUIPMENT_TAG,
    params(InstalledEquipmentListQuery),
    responses(
        (status = 200, description = "Page of records with joined reference data", body = InstalledEquipmentListDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InstalledEquipmentListQuery>,
) -> Result<impl IntoResponse, Error> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let offset = limit * (page - 1);

    let filters = InstalledEquipmentFilters {
        subscriber_id: query.subscriber_id,
        equipment_type_id: query.equipment_type_id,
        status_id: query.status_id,
        equipment_id: query.equipment_id,
        installation_date: query.installation_date,
        installation_location: query.installation_location,
    };

    let (count, rows) = InstalledEquipmentService::new(&state.db)
        .list(filters, limit, offset)
        .await?;

    Ok(Json(InstalledEquipmentListDto { count, rows }))
}

/// Get one installed-equipment record with its reference data
#[utoipa::path(
    get,
    path = "/api/installed-equipment/{id}",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Record with joined reference data", body = InstalledEquipmentDetailDto),
        (status = 404, description = "Record not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let detail = InstalledEquipmentService::new(&state.db)
        .get_detail(id)
        .await?;

    Ok(Json(detail))
}

/// Update one installed-equipment record
#[utoipa::path(
    put,
    path = "/api/installed-equipment/{id}",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Updated record", body = InstalledEquipmentDto),
        (status = 400, description = "Invalid references", body = MessageDto),
        (status = 404, description = "Record not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<UpdateInstalledEquipmentDto>,
) -> Result<impl IntoResponse, Error> {
    let repo = InstalledEquipmentRepository::new(&state.db);

    let updated = repo
        .update(id, to_changes(dto))
        .await
        .map_err(|err| {
            ApiError::BadRequest(format!("Failed to update installed equipment: {}", err))
        })?
        .ok_or_else(|| {
            ApiError::NotFound(
                "Installed equipment with this ID was not found for update.".to_string(),
            )
        })?;

    Ok(Json(InstalledEquipmentDto::from(&updated)))
}

/// Delete one installed-equipment record
#[utoipa::path(
    delete,
    path = "/api/installed-equipment/{id}",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Record deleted", body = MessageDto),
        (status = 404, description = "Record not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = InstalledEquipmentRepository::new(&state.db)
        .delete(id)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(
            "Installed equipment with this ID was not found for deletion.".to_string(),
        )
        .into());
    }

    Ok(Json(MessageDto {
        message: "Installed equipment deleted successfully.".to_string(),
    }))
}

/// Create several installed-equipment records in one transaction
#[utoipa::path(
    post,
    path = "/api/installed-equipment/create-multiple",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 201, description = "All records created", body = BatchResultDto),
        (status = 400, description = "Empty batch or an item missing required fields", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create_multiple(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<BatchCreateDto>,
) -> Result<impl IntoResponse, Error> {
    let created = InstalledEquipmentService::new(&state.db)
        .create_batch(dto.equipment_items)
        .await?;

    let data: Vec<InstalledEquipmentDto> =
        created.iter().map(InstalledEquipmentDto::from).collect();

    Ok((
        StatusCode::CREATED,
        Json(BatchResultDto {
            message: format!("Created {} installed equipment records.", data.len()),
            count: data.len(),
            data,
        }),
    ))
}

/// Update several installed-equipment records
///
/// Items without `installed_equipment_id` are skipped and excluded from the
/// returned set rather than failing the batch.
#[utoipa::path(
    put,
    path = "/api/installed-equipment/update-multiple",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Updated records", body = BatchResultDto),
        (status = 400, description = "Empty batch", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update_multiple(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<BatchUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    let updated = InstalledEquipmentService::new(&state.db)
        .update_batch(dto.equipment_items)
        .await?;

    let data: Vec<InstalledEquipmentDto> =
        updated.iter().map(InstalledEquipmentDto::from).collect();

    Ok(Json(BatchResultDto {
        message: format!("Updated {} records.", data.len()),
        count: data.len(),
        data,
    }))
}

/// List one subscriber's installed equipment
#[utoipa::path(
    get,
    path = "/api/installed-equipment/by-subscriber/{subscriber_id}",
    tag = INSTALLED_EQUIPMENT_TAG,
    responses(
        (status = 200, description = "The subscriber's equipment, newest installation first", body = SubscriberEquipmentDto),
        (status = 404, description = "Subscriber has no installed equipment", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn by_subscriber(
    State(state): State<AppState>,
    Path(subscriber_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let equipment_items = InstalledEquipmentService::new(&state.db)
        .by_subscriber(subscriber_id)
        .await?;

    Ok(Json(SubscriberEquipmentDto {
        subscriber_id,
        equipment_items,
    }))
}

/// Rewords batch-phrased validation messages for the single-create route.
fn single_item_error(err: Error) -> Error {
    match err {
        Error::ApiError(ApiError::BadRequest(message)) => {
            ApiError::BadRequest(message.replace(" in every equipment item", "")).into()
        }
        other => other,
    }
}

fn to_changes(
    dto: UpdateInstalledEquipmentDto,
) -> crate::data::installed_equipment::InstalledEquipmentChanges {
    crate::data::installed_equipment::InstalledEquipmentChanges {
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

//! Equipment catalog endpoints, plus the type and status lookups used by
//! the agreement editor's dropdowns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    controller::util::extract::ApiJson,
    data::{
        equipment::{EquipmentChanges, EquipmentRepository},
        EquipmentStatusRepository, EquipmentTypeRepository,
    },
    error::{ApiError, Error},
    model::{
        api::MessageDto,
        app::AppState,
        equipment::{EquipmentDto, EquipmentPayloadDto, EquipmentStatusDto, EquipmentTypeDto},
    },
};

pub static EQUIPMENT_TAG: &str = "equipment";

/// List the equipment catalog
#[utoipa::path(
    get,
    path = "/api/equipment/",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Catalog entries ordered by name", body = Vec<EquipmentDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let equipment = EquipmentRepository::new(&state.db).list().await?;
    let dtos: Vec<EquipmentDto> = equipment.iter().map(EquipmentDto::from).collect();

    Ok(Json(dtos))
}

/// List equipment types
#[utoipa::path(
    get,
    path = "/api/equipment/types",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Types ordered by name", body = Vec<EquipmentTypeDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn types(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let types = EquipmentTypeRepository::new(&state.db).list().await?;
    let dtos: Vec<EquipmentTypeDto> = types.iter().map(EquipmentTypeDto::from).collect();

    Ok(Json(dtos))
}

/// List equipment statuses
#[utoipa::path(
    get,
    path = "/api/equipment/statuses",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Statuses ordered by name", body = Vec<EquipmentStatusDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn statuses(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let statuses = EquipmentStatusRepository::new(&state.db).list().await?;
    let dtos: Vec<EquipmentStatusDto> = statuses.iter().map(EquipmentStatusDto::from).collect();

    Ok(Json(dtos))
}

/// Create a catalog entry
#[utoipa::path(
    post,
    path = "/api/equipment/",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 201, description = "Catalog entry created", body = EquipmentDto),
        (status = 400, description = "Missing name or invalid numeric fields", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<EquipmentPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let name = dto
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("The name field is required.".to_string()))?;

    let equipment = EquipmentRepository::new(&state.db)
        .create(name, to_changes(dto))
        .await?;

    Ok((StatusCode::CREATED, Json(EquipmentDto::from(&equipment))))
}

/// Get one catalog entry
#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Catalog entry", body = EquipmentDto),
        (status = 404, description = "Equipment not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let equipment = EquipmentRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Equipment not found.".to_string()))?;

    Ok(Json(EquipmentDto::from(&equipment)))
}

/// Update a catalog entry
#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Updated catalog entry", body = EquipmentDto),
        (status = 400, description = "Invalid numeric fields", body = MessageDto),
        (status = 404, description = "Equipment not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<EquipmentPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let updated = EquipmentRepository::new(&state.db)
        .update(id, to_changes(dto))
        .await?
        .ok_or_else(|| ApiError::NotFound("Equipment not found.".to_string()))?;

    Ok(Json(EquipmentDto::from(&updated)))
}

/// Delete a catalog entry
#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    tag = EQUIPMENT_TAG,
    responses(
        (status = 200, description = "Catalog entry deleted", body = MessageDto),
        (status = 404, description = "Equipment not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = EquipmentRepository::new(&state.db).delete(id).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Equipment not found.".to_string()).into());
    }

    Ok(Json(MessageDto {
        message: "Equipment deleted successfully.".to_string(),
    }))
}

fn to_changes(dto: EquipmentPayloadDto) -> EquipmentChanges {
    EquipmentChanges {
        name: dto.name,
        description: dto.description,
        power: dto.power,
        inspection_period: dto.inspection_period,
        service_life: dto.service_life,
        has_thermometer: dto.has_thermometer,
    }
}

//! Organization reference-data endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::extract::ApiJson,
    data::organization::{OrganizationChanges, OrganizationRepository},
    error::{ApiError, Error},
    model::{
        api::MessageDto,
        app::AppState,
        organization::{OrganizationDto, OrganizationPayloadDto},
    },
};

pub static ORGANIZATION_TAG: &str = "organizations";

/// Create an organization
#[utoipa::path(
    post,
    path = "/api/organizations/",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Missing name or duplicate name", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<OrganizationPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    let name = dto
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("The name field is required.".to_string()))?;

    let repo = OrganizationRepository::new(&state.db);

    if repo.find_by_name(&name).await?.is_some() {
        return Err(ApiError::BadRequest(
            "An organization with this name already exists.".to_string(),
        )
        .into());
    }

    let organization = repo.create(name, to_changes(dto)).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrganizationDto::from(&organization)),
    ))
}

/// List organizations
#[utoipa::path(
    get,
    path = "/api/organizations/",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "Organizations ordered by name", body = Vec<OrganizationDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let organizations = OrganizationRepository::new(&state.db).list().await?;
    let dtos: Vec<OrganizationDto> = organizations.iter().map(OrganizationDto::from).collect();

    Ok(Json(dtos))
}

/// Get one organization
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "Organization record", body = OrganizationDto),
        (status = 404, description = "Organization not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let organization = OrganizationRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found.".to_string()))?;

    Ok(Json(OrganizationDto::from(&organization)))
}

/// Update an organization
#[utoipa::path(
    put,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "Updated organization", body = OrganizationDto),
        (status = 400, description = "Duplicate name", body = MessageDto),
        (status = 404, description = "Organization not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<OrganizationPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    let repo = OrganizationRepository::new(&state.db);

    let organization = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found.".to_string()))?;

    // Renaming onto another organization's unique name is a 400, not a
    // database error.
    if let Some(name) = &dto.name {
        if *name != organization.name && repo.find_by_name(name).await?.is_some() {
            return Err(ApiError::BadRequest(
                "An organization with this name already exists.".to_string(),
            )
            .into());
        }
    }

    let updated = repo
        .update(id, to_changes(dto))
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found.".to_string()))?;

    Ok(Json(OrganizationDto::from(&updated)))
}

/// Delete an organization
#[utoipa::path(
    delete,
    path = "/api/organizations/{id}",
    tag = ORGANIZATION_TAG,
    responses(
        (status = 200, description = "Organization deleted", body = MessageDto),
        (status = 404, description = "Organization not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = OrganizationRepository::new(&state.db).delete(id).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Organization not found.".to_string()).into());
    }

    Ok(Json(MessageDto {
        message: "Organization deleted successfully.".to_string(),
    }))
}

fn to_changes(dto: OrganizationPayloadDto) -> OrganizationChanges {
    OrganizationChanges {
        name: dto.name,
        address: dto.address,
        phone_number: dto.phone_number,
        contact_person: dto.contact_person,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use gastrack_test_utils::prelude::*;
    use tower::ServiceExt;

    use crate::{
        router,
        util::test::{test_state, MockMailer},
    };

    async fn app() -> Result<axum::Router, TestError> {
        let test = test_setup_with_all_tables!()?;
        let state = test_state(test.db, Arc::new(MockMailer::new()));

        Ok(router::routes().with_state(state))
    }

    fn post(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/organizations/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Expect duplicate organization names to be rejected with 400
    #[tokio::test]
    async fn create_rejects_duplicate_name() -> Result<(), TestError> {
        let app = app().await?;

        let response = app
            .clone()
            .oneshot(post(serde_json::json!({ "name": "Gas Services LLC" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(post(serde_json::json!({ "name": "Gas Services LLC" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 404 for a missing organization
    #[tokio::test]
    async fn get_missing_organization_is_not_found() -> Result<(), TestError> {
        let app = app().await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/organizations/55")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

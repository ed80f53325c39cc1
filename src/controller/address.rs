//! Address reference-data endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    controller::util::extract::ApiJson,
    data::address::{AddressChanges, AddressRepository},
    error::{ApiError, Error},
    model::{
        address::{AddressDto, AddressListDto, AddressListQuery, AddressPayloadDto},
        api::MessageDto,
        app::AppState,
    },
};

pub static ADDRESS_TAG: &str = "addresses";

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Create an address
#[utoipa::path(
    post,
    path = "/api/addresses/",
    tag = ADDRESS_TAG,
    responses(
        (status = 201, description = "Address created", body = AddressDto),
        (status = 400, description = "Missing required fields or malformed zip code", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<AddressPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    if dto.city.is_none()
        || dto.street.is_none()
        || dto.house_number.is_none()
        || dto.zip_code.is_none()
    {
        return Err(ApiError::BadRequest(
            "Missing required fields: city, street, house number, zip code.".to_string(),
        )
        .into());
    }

    let zip_code = dto.zip_code.clone().unwrap();
    let changes = to_changes(dto);

    let address = AddressRepository::new(&state.db)
        .create(changes, zip_code)
        .await?;

    Ok((StatusCode::CREATED, Json(AddressDto::from(&address))))
}

/// List addresses with filters and pagination
#[utoipa::path(
    get,
    path = "/api/addresses/",
    tag = ADDRESS_TAG,
    params(AddressListQuery),
    responses(
        (status = 200, description = "Page of addresses plus total count", body = AddressListDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AddressListQuery>,
) -> Result<impl IntoResponse, Error> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let offset = limit * (page - 1);

    let (count, rows) = AddressRepository::new(&state.db)
        .list(query.city.as_deref(), query.street.as_deref(), limit, offset)
        .await?;

    Ok(Json(AddressListDto {
        count,
        rows: rows.iter().map(AddressDto::from).collect(),
    }))
}

/// Get one address
#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    tag = ADDRESS_TAG,
    responses(
        (status = 200, description = "Address record", body = AddressDto),
        (status = 404, description = "Address not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let address = AddressRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Address with this ID was not found".to_string()))?;

    Ok(Json(AddressDto::from(&address)))
}

/// Update an address
#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = ADDRESS_TAG,
    responses(
        (status = 200, description = "Updated address record", body = AddressDto),
        (status = 400, description = "Malformed zip code", body = MessageDto),
        (status = 404, description = "Address not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<AddressPayloadDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let updated = AddressRepository::new(&state.db)
        .update(id, to_changes(dto))
        .await?
        .ok_or_else(|| ApiError::NotFound("Address with this ID was not found".to_string()))?;

    Ok(Json(AddressDto::from(&updated)))
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = ADDRESS_TAG,
    responses(
        (status = 200, description = "Address deleted", body = MessageDto),
        (status = 404, description = "Address not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = AddressRepository::new(&state.db).delete(id).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Address with this ID was not found".to_string()).into());
    }

    Ok(Json(MessageDto {
        message: "Address deleted successfully".to_string(),
    }))
}

fn to_changes(dto: AddressPayloadDto) -> AddressChanges {
    AddressChanges {
        region: dto.region,
        district: dto.district,
        city: dto.city,
        street: dto.street,
        house_number: dto.house_number,
        apartment_number: dto.apartment_number,
        zip_code: dto.zip_code,
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

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Expect 201 for a complete payload and 400 when required fields are
    /// missing
    #[tokio::test]
    async fn create_requires_fields() -> Result<(), TestError> {
        let app = app().await?;

        let response = app
            .clone()
            .oneshot(post(
                "/api/addresses/",
                serde_json::json!({
                    "city": "Tver",
                    "street": "Sovetskaya",
                    "house_number": "10",
                    "zip_code": "170100"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(post(
                "/api/addresses/",
                serde_json::json!({ "city": "Tver" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 400 for a zip code that is not exactly 6 digits
    #[tokio::test]
    async fn create_rejects_bad_zip() -> Result<(), TestError> {
        let app = app().await?;

        let response = app
            .oneshot(post(
                "/api/addresses/",
                serde_json::json!({
                    "city": "Tver",
                    "street": "Sovetskaya",
                    "house_number": "10",
                    "zip_code": "12345"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 404 when deleting an address that does not exist
    #[tokio::test]
    async fn delete_missing_address_is_not_found() -> Result<(), TestError> {
        let app = app().await?;

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/addresses/77")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

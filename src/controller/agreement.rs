//! Agreement endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::extract::ApiJson,
    data::agreement::{AgreementChanges, AgreementRepository},
    error::{ApiError, Error},
    model::{
        agreement::{
            AgreementDetailDto, AgreementDto, AgreementRowDto, CreateAgreementDto,
            UpdateAgreementDto,
        },
        api::MessageDto,
        app::AppState,
    },
    service::agreement::AgreementService,
};

pub static AGREEMENT_TAG: &str = "agreements";

/// List all agreements with equipment counts
#[utoipa::path(
    get,
    path = "/api/agreements/",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "Agreements ordered by start date descending", body = Vec<AgreementDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let agreements = AgreementService::new(&state.db).list(None).await?;

    Ok(Json(agreements))
}

/// List one subscriber's agreements with equipment counts
#[utoipa::path(
    get,
    path = "/api/agreements/by-subscriber/{subscriber_id}",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "The subscriber's agreements", body = Vec<AgreementDto>),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn by_subscriber(
    State(state): State<AppState>,
    Path(subscriber_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let agreements = AgreementService::new(&state.db)
        .list(Some(subscriber_id))
        .await?;

    Ok(Json(agreements))
}

/// Get one agreement with its installed equipment
#[utoipa::path(
    get,
    path = "/api/agreements/{id}",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "Agreement with line items", body = AgreementDetailDto),
        (status = 404, description = "Agreement not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let detail = AgreementService::new(&state.db).get_detail(id).await?;

    Ok(Json(detail))
}

/// Create an agreement
#[utoipa::path(
    post,
    path = "/api/agreements/create",
    tag = AGREEMENT_TAG,
    responses(
        (status = 201, description = "Agreement created", body = AgreementRowDto),
        (status = 400, description = "Missing required fields or duplicate agreement number", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreateAgreementDto>,
) -> Result<impl IntoResponse, Error> {
    let (subscriber_id, agreement_number, start_date) =
        match (dto.subscriber_id, dto.agreement_number, dto.start_date) {
            (Some(subscriber_id), Some(agreement_number), Some(start_date)) => {
                (subscriber_id, agreement_number, start_date)
            }
            _ => {
                return Err(ApiError::BadRequest(
                    "subscriber_id, agreement_number and start_date are required".to_string(),
                )
                .into())
            }
        };

    let agreement = AgreementRepository::new(&state.db)
        .create(
            subscriber_id,
            agreement_number,
            start_date,
            dto.end_date,
            dto.notes,
        )
        .await
        .map_err(|err| ApiError::BadRequest(format!("Failed to create agreement: {}", err)))?;

    Ok((StatusCode::CREATED, Json(AgreementRowDto::from(&agreement))))
}

/// Update an agreement
#[utoipa::path(
    put,
    path = "/api/agreements/{id}",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "Updated agreement", body = AgreementRowDto),
        (status = 400, description = "Update failed validation or uniqueness", body = MessageDto),
        (status = 404, description = "Agreement not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<UpdateAgreementDto>,
) -> Result<impl IntoResponse, Error> {
    let changes = AgreementChanges {
        agreement_number: dto.agreement_number,
        start_date: dto.start_date,
        end_date: dto.end_date,
        notes: dto.notes,
    };

    let updated = AgreementRepository::new(&state.db)
        .update(id, changes)
        .await
        .map_err(|err| ApiError::BadRequest(format!("Failed to update agreement: {}", err)))?
        .ok_or_else(|| {
            ApiError::NotFound("Agreement with this ID was not found for update.".to_string())
        })?;

    Ok(Json(AgreementRowDto::from(&updated)))
}

/// Delete an agreement
#[utoipa::path(
    delete,
    path = "/api/agreements/{id}",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "Agreement deleted", body = MessageDto),
        (status = 404, description = "Agreement not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = AgreementRepository::new(&state.db).delete(id).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(
            "Agreement with this ID was not found for deletion.".to_string(),
        )
        .into());
    }

    Ok(Json(MessageDto {
        message: "Agreement deleted successfully.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use gastrack_test_utils::prelude::*;
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use crate::{
        router,
        util::test::{test_state, MockMailer},
    };

    async fn app() -> Result<(axum::Router, DatabaseConnection), TestError> {
        let test = test_setup_with_all_tables!()?;
        let db = test.db.clone();
        let state = test_state(test.db, Arc::new(MockMailer::new()));

        Ok((router::routes().with_state(state), db))
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Expect 400 without start_date and 201 with a numeric agreement_id on
    /// valid creation
    #[tokio::test]
    async fn create_validates_required_fields() -> Result<(), TestError> {
        let (app, db) = app().await?;
        let subscriber =
            fixtures::insert_subscriber(&db, "ivan@example.com", "password-123", true).await?;

        let response = app
            .clone()
            .oneshot(post(
                "/api/agreements/create",
                serde_json::json!({
                    "subscriber_id": subscriber.subscriber_id,
                    "agreement_number": "AG-1"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post(
                "/api/agreements/create",
                serde_json::json!({
                    "subscriber_id": subscriber.subscriber_id,
                    "agreement_number": "AG-1",
                    "start_date": "2024-03-15"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["agreement_id"].is_number());

        Ok(())
    }

    /// Expect 404, not 200, when deleting a nonexistent agreement
    #[tokio::test]
    async fn delete_missing_agreement_is_not_found() -> Result<(), TestError> {
        let (app, _) = app().await?;

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/agreements/4242")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect the list to expose equipmentCount per agreement
    #[tokio::test]
    async fn list_includes_equipment_count() -> Result<(), TestError> {
        let (app, db) = app().await?;
        let subscriber =
            fixtures::insert_subscriber(&db, "ivan@example.com", "password-123", true).await?;
        fixtures::insert_agreement(&db, subscriber.subscriber_id, "AG-1", fixtures::past_date())
            .await?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/agreements/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed[0]["equipmentCount"], 0);

        Ok(())
    }
}

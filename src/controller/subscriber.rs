//! Subscriber management endpoints. Ownership checks run inline: a
//! subscriber may only view or modify their own record unless they hold the
//! ADMIN role.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::{
        claims::{require_admin, require_self_or_admin},
        extract::ApiJson,
    },
    data::subscriber::{SubscriberChanges, SubscriberRepository},
    error::{ApiError, Error},
    model::{
        api::MessageDto,
        app::AppState,
        auth::Claims,
        subscriber::{ChangePasswordDto, SubscriberDto, UpdateSubscriberDto, UPDATE_PHONE_RE},
    },
    service::password,
};

pub static SUBSCRIBER_TAG: &str = "subscribers";

/// List all subscribers (admin only)
#[utoipa::path(
    get,
    path = "/api/subscribers/",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "All subscriber records", body = Vec<SubscriberDto>),
        (status = 401, description = "Not authorized", body = MessageDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, Error> {
    require_admin(&claims)?;

    let subscribers = SubscriberRepository::new(&state.db).list().await?;
    let dtos: Vec<SubscriberDto> = subscribers.iter().map(SubscriberDto::from).collect();

    Ok(Json(dtos))
}

/// Get one subscriber (owner or admin)
#[utoipa::path(
    get,
    path = "/api/subscribers/{id}",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "Subscriber record", body = SubscriberDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 404, description = "Subscriber not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let subscriber = SubscriberRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    require_self_or_admin(&claims, subscriber.subscriber_id)?;

    Ok(Json(SubscriberDto::from(&subscriber)))
}

/// Update a subscriber's profile (owner or admin)
#[utoipa::path(
    put,
    path = "/api/subscribers/{id}",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "Updated subscriber record", body = SubscriberDto),
        (status = 400, description = "Invalid phone number", body = MessageDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 404, description = "Subscriber not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<UpdateSubscriberDto>,
) -> Result<impl IntoResponse, Error> {
    let repo = SubscriberRepository::new(&state.db);

    let subscriber = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    require_self_or_admin(&claims, subscriber.subscriber_id)?;

    if let Some(phone_number) = &dto.phone_number {
        if !UPDATE_PHONE_RE.is_match(phone_number) {
            return Err(ApiError::BadRequest("Invalid phone number".to_string()).into());
        }
    }

    let changes = SubscriberChanges {
        first_name: dto.first_name,
        last_name: dto.last_name,
        middle_name: dto.middle_name,
        date_of_birth: dto.date_of_birth,
        phone_number: dto.phone_number,
        email: dto.email,
        snils: dto.snils,
        address_id: dto.address_id,
    };

    let updated = repo
        .update_profile(id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    Ok(Json(SubscriberDto::from(&updated)))
}

/// Delete a subscriber (admin only)
#[utoipa::path(
    delete,
    path = "/api/subscribers/{id}",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "Subscriber deleted", body = MessageDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 404, description = "Subscriber not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let repo = SubscriberRepository::new(&state.db);

    repo.get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    require_admin(&claims)?;

    repo.delete(id).await?;

    Ok(Json(MessageDto {
        message: "Subscriber deleted".to_string(),
    }))
}

/// Change a subscriber's password (owner or admin)
///
/// Verifies the current password before storing the new hash; the new
/// password must be at least 10 characters.
#[utoipa::path(
    post,
    path = "/api/subscribers/{id}/change-password",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Wrong current password or new password too short", body = MessageDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 404, description = "Subscriber not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    ApiJson(dto): ApiJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let repo = SubscriberRepository::new(&state.db);

    let subscriber = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    require_self_or_admin(&claims, subscriber.subscriber_id)?;

    if !password::verify_password(&dto.current_password, &subscriber.password) {
        return Err(ApiError::BadRequest("Current password is incorrect.".to_string()).into());
    }

    if dto.new_password.len() < 10 {
        return Err(ApiError::BadRequest(
            "New password must be at least 10 characters.".to_string(),
        )
        .into());
    }

    let password_hash = password::hash_password(&dto.new_password)?;
    repo.update_password(id, password_hash).await?;

    Ok(Json(MessageDto {
        message: "Password changed successfully".to_string(),
    }))
}

/// Delete one's own account (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/subscribers/{id}/delete-account",
    tag = SUBSCRIBER_TAG,
    responses(
        (status = 200, description = "Account deleted", body = MessageDto),
        (status = 403, description = "Access denied", body = MessageDto),
        (status = 404, description = "Subscriber not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let repo = SubscriberRepository::new(&state.db);

    let subscriber = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriber not found".to_string()))?;

    require_self_or_admin(&claims, subscriber.subscriber_id)?;

    repo.delete(id).await?;

    Ok(Json(MessageDto {
        message: "Account deleted".to_string(),
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
    use tower::ServiceExt;

    use crate::{
        router,
        service::token,
        util::test::{test_config, test_state, MockMailer},
    };

    struct TestApp {
        app: axum::Router,
        user_token: String,
        admin_token: String,
        user_id: i32,
    }

    async fn setup() -> Result<TestApp, TestError> {
        let test = test_setup_with_all_tables!()?;
        let config = test_config();

        let user =
            fixtures::insert_subscriber(&test.db, "ivan@example.com", "password-123", true).await?;
        let admin = fixtures::insert_admin(&test.db, "olga@example.com", "password-123").await?;

        let user_token = token::issue_token(&user, &config).unwrap();
        let admin_token = token::issue_token(&admin, &config).unwrap();

        let state = test_state(test.db, Arc::new(MockMailer::new()));

        Ok(TestApp {
            app: router::routes().with_state(state),
            user_token,
            admin_token,
            user_id: user.subscriber_id,
        })
    }

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    /// Expect 403 for USER bearers and 200 for ADMIN bearers on the full
    /// listing
    #[tokio::test]
    async fn list_is_admin_only() -> Result<(), TestError> {
        let test = setup().await?;

        let response = test
            .app
            .clone()
            .oneshot(get("/api/subscribers/", &test.user_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = test
            .app
            .oneshot(get("/api/subscribers/", &test.admin_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);

        Ok(())
    }

    /// Expect a phone update to round-trip exactly
    #[tokio::test]
    async fn update_round_trips_phone_number() -> Result<(), TestError> {
        let test = setup().await?;
        let uri = format!("/api/subscribers/{}", test.user_id);

        let request = Request::builder()
            .method("PUT")
            .uri(&uri)
            .header("authorization", format!("Bearer {}", test.user_token))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "phone_number": "+71234567890" }).to_string(),
            ))
            .unwrap();

        let response = test.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = test
            .app
            .oneshot(get(&uri, &test.user_token))
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["phone_number"], "+71234567890");

        Ok(())
    }

    /// Expect 400 for a phone number outside the strict +7 format
    #[tokio::test]
    async fn update_rejects_bad_phone_number() -> Result<(), TestError> {
        let test = setup().await?;

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/api/subscribers/{}", test.user_id))
            .header("authorization", format!("Bearer {}", test.user_token))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "phone_number": "8-900-123-45-67" }).to_string(),
            ))
            .unwrap();

        let response = test.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect a USER bearer to be denied another subscriber's record
    #[tokio::test]
    async fn get_one_enforces_ownership() -> Result<(), TestError> {
        let test = setup().await?;

        // The admin's record belongs to someone else from the user's
        // perspective.
        let admin_id = test.user_id + 1;
        let response = test
            .app
            .oneshot(get(
                &format!("/api/subscribers/{admin_id}"),
                &test.user_token,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect delete to be admin only
    #[tokio::test]
    async fn delete_is_admin_only() -> Result<(), TestError> {
        let test = setup().await?;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/subscribers/{}", test.user_id))
            .header("authorization", format!("Bearer {}", test.user_token))
            .body(Body::empty())
            .unwrap();

        let response = test.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/subscribers/{}", test.user_id))
            .header("authorization", format!("Bearer {}", test.admin_token))
            .body(Body::empty())
            .unwrap();

        let response = test.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect change-password to verify the current password and the new
    /// password length
    #[tokio::test]
    async fn change_password_validates() -> Result<(), TestError> {
        let test = setup().await?;
        let uri = format!("/api/subscribers/{}/change-password", test.user_id);

        let wrong_current = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("authorization", format!("Bearer {}", test.user_token))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "currentPassword": "not-the-password",
                    "newPassword": "long-enough-new"
                })
                .to_string(),
            ))
            .unwrap();
        let response = test.app.clone().oneshot(wrong_current).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let too_short = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("authorization", format!("Bearer {}", test.user_token))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "currentPassword": "password-123",
                    "newPassword": "short"
                })
                .to_string(),
            ))
            .unwrap();
        let response = test.app.clone().oneshot(too_short).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let valid = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("authorization", format!("Bearer {}", test.user_token))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "currentPassword": "password-123",
                    "newPassword": "much-longer-password"
                })
                .to_string(),
            ))
            .unwrap();
        let response = test.app.oneshot(valid).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }
}

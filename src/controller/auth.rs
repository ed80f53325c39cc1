//! Registration, login, activation, and token check endpoints.

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    controller::util::extract::ApiJson,
    error::{ApiError, Error},
    model::{
        api::MessageDto,
        app::AppState,
        auth::{
            ActivateDto, ActivationTokenDto, AuthTokenDto, Claims, LoginDto, RegistrationDto,
            ResendActivationDto,
        },
        subscriber::SubscriberProfileDto,
    },
    service::auth::AuthService,
};

pub static AUTH_TAG: &str = "auth";

/// Register a new subscriber and send the activation email
///
/// The response reports success even when the activation email could not be
/// delivered; the delivery outcome is recorded on the subscriber.
#[utoipa::path(
    post,
    path = "/api/auth/registration",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Registration accepted", body = MessageDto),
        (status = 400, description = "Validation failure or email already registered", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn registration(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<RegistrationDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    auth_service.register(dto).await?;

    Ok(Json(MessageDto {
        message: "Registration successful. Please check your email to activate your account."
            .to_string(),
    }))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Token issued", body = AuthTokenDto),
        (status = 401, description = "Invalid email or password", body = MessageDto),
        (status = 403, description = "Account not activated", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    let (subscriber, token) = auth_service.login(&dto).await?;

    Ok(Json(AuthTokenDto {
        token,
        user: SubscriberProfileDto::from(&subscriber),
    }))
}

/// Redeem an emailed activation code
#[utoipa::path(
    post,
    path = "/api/auth/activate",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Account activated", body = ActivationTokenDto),
        (status = 400, description = "Unknown or expired activation code", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn activate(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ActivateDto>,
) -> Result<impl IntoResponse, Error> {
    if dto.activation_code.is_empty() {
        return Err(ApiError::BadRequest("Activation code was not provided".to_string()).into());
    }

    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    let (_, token) = auth_service.activate(&dto.activation_code).await?;

    Ok(Json(ActivationTokenDto {
        message: "Account activated successfully!".to_string(),
        token,
    }))
}

/// Re-send the activation email
#[utoipa::path(
    post,
    path = "/api/auth/resend-activation",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Resend handled", body = MessageDto),
        (status = 400, description = "Subscriber unknown or already activated", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn resend_activation(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ResendActivationDto>,
) -> Result<impl IntoResponse, Error> {
    dto.validate().map_err(ApiError::from)?;

    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    let message = auth_service.resend_activation(&dto.email).await?;

    Ok(Json(MessageDto {
        message: message.to_string(),
    }))
}

/// Re-validate the bearer and issue a fresh token
#[utoipa::path(
    get,
    path = "/api/auth/check",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Token refreshed", body = AuthTokenDto),
        (status = 401, description = "Missing/invalid token or subscriber gone", body = MessageDto),
        (status = 403, description = "Account not activated", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn check(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, Error> {
    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    let (subscriber, token) = auth_service.check(&claims).await?;

    Ok(Json(AuthTokenDto {
        token,
        user: SubscriberProfileDto::from(&subscriber),
    }))
}

//! Standalone activation endpoint kept for the front end's confirm-code
//! page. Delegates to the same activation flow as `/api/auth/activate` and
//! issues the standard token.

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    controller::util::extract::ApiJson,
    error::Error,
    model::{
        api::MessageDto,
        app::AppState,
        auth::{ActivateDto, TokenDto},
    },
    service::auth::AuthService,
};

pub static ACTIVATION_TAG: &str = "activation";

/// Redeem an activation code (standalone route)
#[utoipa::path(
    post,
    path = "/api/activation",
    tag = ACTIVATION_TAG,
    responses(
        (status = 200, description = "Account activated", body = TokenDto),
        (status = 400, description = "Unknown or expired activation code", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn activate(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ActivateDto>,
) -> Result<impl IntoResponse, Error> {
    let auth_service = AuthService::new(&state.db, state.mailer.as_ref(), &state.config);
    let (_, token) = auth_service.activate(&dto.activation_code).await?;

    Ok(Json(TokenDto { token }))
}

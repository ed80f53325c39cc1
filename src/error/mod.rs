//! Error types for the gastrack server.
//!
//! Domain failures that map to a specific HTTP status travel as [`ApiError`];
//! everything else (database, token signing, hashing) is wrapped by the
//! top-level [`Error`] and surfaces as a 500 with a generic message, with the
//! real cause logged server-side.

pub mod api;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::MessageDto;

pub use api::ApiError;
pub use config::ConfigError;

/// Main error type for the gastrack server.
///
/// Aggregates domain errors and external library errors into a single type so
/// handlers can use `?` throughout. The `IntoResponse` implementation maps
/// each variant to the JSON error shape `{ "message": ... }`.
#[derive(Error, Debug)]
pub enum Error {
    /// Domain error carrying an HTTP status and client-facing message.
    #[error(transparent)]
    ApiError(#[from] ApiError),
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Token signing or verification failure.
    #[error(transparent)]
    TokenError(#[from] jsonwebtoken::errors::Error),
    /// Password hashing failure.
    #[error("Failed to hash password: {0}")]
    PasswordHashError(String),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHashError(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ApiError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 response.
///
/// Logs the full error message for debugging but returns a fixed message to
/// the client so internal details are not exposed.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageDto {
                message: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

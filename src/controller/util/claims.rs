//! Bearer-token extractor and role/ownership gates.

use axum::{extract::FromRequestParts, http::request::Parts};
use entity::subscriber::Role;

use crate::{
    error::{ApiError, Error},
    model::{app::AppState, auth::Claims},
    service::token,
};

/// Extracts and verifies the bearer token from the `Authorization` header.
///
/// Present in a handler's signature, this makes the route require
/// authentication: missing, malformed, expired, or tampered tokens reject
/// with 401 before the handler body runs.
impl FromRequestParts<AppState> for Claims {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

        if token.is_empty() {
            return Err(unauthorized());
        }

        let claims =
            token::verify_token(token, &state.config.secret_key).map_err(|err| {
                tracing::debug!(%err, "bearer token verification failed");
                unauthorized()
            })?;

        Ok(claims)
    }
}

fn unauthorized() -> Error {
    ApiError::Unauthorized("Not authorized".to_string()).into()
}

/// Gate for admin-only routes.
pub fn require_admin(claims: &Claims) -> Result<(), Error> {
    if claims.role != Role::Admin {
        return Err(ApiError::Forbidden("Access denied".to_string()).into());
    }

    Ok(())
}

/// Subscribers may only act on their own record unless they are admins.
pub fn require_self_or_admin(claims: &Claims, subscriber_id: i32) -> Result<(), Error> {
    if claims.role != Role::Admin && claims.id != subscriber_id {
        return Err(ApiError::Forbidden("Access denied".to_string()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::FromRequestParts, http::Request};
    use chrono::Utc;
    use entity::subscriber::{ActivationEmailStatus, Role};
    use gastrack_test_utils::prelude::*;

    use crate::{
        model::{app::AppState, auth::Claims},
        service::token,
        util::test::{test_state, MockMailer},
    };

    use super::{require_admin, require_self_or_admin};

    fn subscriber(role: Role) -> entity::subscriber::Model {
        let now = Utc::now().naive_utc();
        entity::subscriber::Model {
            subscriber_id: 1,
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            middle_name: None,
            date_of_birth: None,
            phone_number: None,
            email: Some("ivan@example.com".to_string()),
            snils: None,
            password: "hash".to_string(),
            is_activated: true,
            activation_code: None,
            activation_code_expires: None,
            role,
            activation_email_status: ActivationEmailStatus::Sent,
            address_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn state() -> Result<AppState, TestError> {
        let test = test_setup_with_tables!()?;

        Ok(test_state(test.db, Arc::new(MockMailer::new())))
    }

    async fn extract(
        request: Request<axum::body::Body>,
        state: &AppState,
    ) -> Result<Claims, crate::error::Error> {
        let (mut parts, _) = request.into_parts();

        Claims::from_request_parts(&mut parts, state).await
    }

    /// Expect a valid bearer token to yield its claims
    #[tokio::test]
    async fn accepts_valid_token() -> Result<(), TestError> {
        let state = state().await?;
        let token = token::issue_token(&subscriber(Role::User), &state.config).unwrap();

        let request = Request::builder()
            .header(
                axum::http::header::AUTHORIZATION,
                format!("Bearer {token}"),
            )
            .body(axum::body::Body::empty())
            .unwrap();

        let claims = extract(request, &state).await.unwrap();

        assert_eq!(claims.id, 1);
        assert_eq!(claims.role, Role::User);

        Ok(())
    }

    /// Expect 401 when the header is absent
    #[tokio::test]
    async fn rejects_missing_header() -> Result<(), TestError> {
        let state = state().await?;

        let request = Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract(request, &state).await.is_err());

        Ok(())
    }

    /// Expect 401 for a non-bearer scheme
    #[tokio::test]
    async fn rejects_non_bearer_scheme() -> Result<(), TestError> {
        let state = state().await?;

        let request = Request::builder()
            .header(axum::http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract(request, &state).await.is_err());

        Ok(())
    }

    /// Expect 401 for a token signed with another secret
    #[tokio::test]
    async fn rejects_tampered_token() -> Result<(), TestError> {
        let state = state().await?;

        let mut other_config = crate::util::test::test_config();
        other_config.secret_key = "another-secret".to_string();
        let token = token::issue_token(&subscriber(Role::User), &other_config).unwrap();

        let request = Request::builder()
            .header(
                axum::http::header::AUTHORIZATION,
                format!("Bearer {token}"),
            )
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract(request, &state).await.is_err());

        Ok(())
    }

    #[test]
    fn admin_gate_rejects_users() {
        let admin = Claims {
            id: 1,
            email: "a@example.com".to_string(),
            role: Role::Admin,
            first_name: "Olga".to_string(),
            last_name: "Sidorova".to_string(),
            exp: 0,
        };
        let user = Claims {
            role: Role::User,
            ..admin.clone()
        };

        assert!(require_admin(&admin).is_ok());
        assert!(require_admin(&user).is_err());
    }

    #[test]
    fn ownership_gate_allows_self_and_admin() {
        let user = Claims {
            id: 5,
            email: "u@example.com".to_string(),
            role: Role::User,
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            exp: 0,
        };

        assert!(require_self_or_admin(&user, 5).is_ok());
        assert!(require_self_or_admin(&user, 6).is_err());

        let admin = Claims {
            role: Role::Admin,
            ..user
        };
        assert!(require_self_or_admin(&admin, 6).is_ok());
    }
}

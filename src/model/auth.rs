//! Request/response contracts for the authentication and activation flow.
//!
//! Registration and login payloads are validated at the boundary with
//! exhaustive field lists; schema violations are flattened into a single
//! 400 message by [`crate::error::ApiError`].

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::subscriber::SubscriberProfileDto;

/// Optional `+`, optional parens around the prefix, separators allowed
/// between groups. Mirrors the format accepted on subscriber rows.
pub static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").unwrap()
});

/// Insurance account number: exactly 11 digits.
pub static SNILS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{11}$").unwrap());

/// Bearer token payload.
///
/// Deserialization doubles as the token-content check: a token missing any of
/// these fields fails verification outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub role: entity::subscriber::Role,
    pub first_name: String,
    pub last_name: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegistrationDto {
    #[validate(length(min = 2, max = 100, message = "first name must be 2-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100, message = "last name must be 2-100 characters"))]
    pub last_name: String,
    #[validate(length(max = 100, message = "middle name must be at most 100 characters"))]
    pub middle_name: Option<String>,
    #[validate(custom(function = validate_date_of_birth))]
    pub date_of_birth: Option<NaiveDate>,
    #[validate(regex(path = *PHONE_RE, message = "invalid phone number format"))]
    pub phone_number: Option<String>,
    #[validate(
        email(message = "invalid email format"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(regex(path = *SNILS_RE, message = "SNILS must be exactly 11 digits"))]
    pub snils: Option<String>,
    #[validate(length(min = 8, max = 30, message = "password must be 8-30 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginDto {
    #[validate(
        email(message = "invalid email format"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, max = 30, message = "password must be 8-30 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct ResendActivationDto {
    #[validate(
        email(message = "invalid email format"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ActivateDto {
    #[serde(rename = "activationCode")]
    pub activation_code: String,
}

/// Token plus the bearer's profile, returned by login and check.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    pub user: SubscriberProfileDto,
}

/// Bare token response, returned by the standalone activation route.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenDto {
    pub token: String,
}

/// Confirmation plus a fresh token, returned by activation.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ActivationTokenDto {
    pub message: String,
    pub token: String,
}

fn validate_date_of_birth(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date >= Utc::now().date_naive() {
        let mut error = ValidationError::new("date_of_birth");
        error.message = Some("date of birth must be in the past".into());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegistrationDto {
        RegistrationDto {
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            middle_name: None,
            date_of_birth: None,
            phone_number: Some("+71234567890".to_string()),
            email: "ivan@example.com".to_string(),
            snils: Some("12345678901".to_string()),
            password: "long-enough".to_string(),
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let mut dto = valid_registration();
        dto.password = "short".to_string();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        let mut dto = valid_registration();
        dto.email = "not-an-email".to_string();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_short_snils() {
        let mut dto = valid_registration();
        dto.snils = Some("123".to_string());

        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_future_date_of_birth() {
        let mut dto = valid_registration();
        dto.date_of_birth = Some(Utc::now().date_naive() + chrono::Duration::days(1));

        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_missing_optional_fields() {
        let mut dto = valid_registration();
        dto.phone_number = None;
        dto.snils = None;

        assert!(dto.validate().is_ok());
    }
}

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

/// Profile updates only accept the strict national format `+7` plus ten
/// digits, unlike the looser registration pattern.
pub static UPDATE_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+7\d{10}$").unwrap());

/// Subscriber profile embedded in authentication responses.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubscriberProfileDto {
    pub id: i32,
    pub email: Option<String>,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub snils: Option<String>,
}

impl From<&entity::subscriber::Model> for SubscriberProfileDto {
    fn from(model: &entity::subscriber::Model) -> Self {
        Self {
            id: model.subscriber_id,
            email: model.email.clone(),
            role: model.role.to_value(),
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            middle_name: model.middle_name.clone(),
            date_of_birth: model.date_of_birth,
            phone_number: model.phone_number.clone(),
            snils: model.snils.clone(),
        }
    }
}

/// Subscriber row as exposed to management endpoints. The password hash and
/// activation code never leave the server.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubscriberDto {
    pub subscriber_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub snils: Option<String>,
    pub role: String,
    pub is_activated: bool,
    pub activation_email_status: String,
    pub address_id: Option<i32>,
}

impl From<&entity::subscriber::Model> for SubscriberDto {
    fn from(model: &entity::subscriber::Model) -> Self {
        Self {
            subscriber_id: model.subscriber_id,
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            middle_name: model.middle_name.clone(),
            date_of_birth: model.date_of_birth,
            phone_number: model.phone_number.clone(),
            email: model.email.clone(),
            snils: model.snils.clone(),
            role: model.role.to_value(),
            is_activated: model.is_activated,
            activation_email_status: model.activation_email_status.to_value(),
            address_id: model.address_id,
        }
    }
}

/// Partial update of a subscriber row; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateSubscriberDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub snils: Option<String>,
    pub address_id: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

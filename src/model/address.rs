use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal code: exactly 6 digits.
pub static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{6}$").unwrap());

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddressDto {
    pub address_id: i32,
    pub region: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub apartment_number: Option<String>,
    pub zip_code: String,
}

impl From<&entity::address::Model> for AddressDto {
    fn from(model: &entity::address::Model) -> Self {
        Self {
            address_id: model.address_id,
            region: model.region.clone(),
            district: model.district.clone(),
            city: model.city.clone(),
            street: model.street.clone(),
            house_number: model.house_number.clone(),
            apartment_number: model.apartment_number.clone(),
            zip_code: model.zip_code.clone(),
        }
    }
}

/// Payload for creating or updating an address. Presence of the required
/// fields (city, street, house number, zip code) is checked by the handler so
/// the same shape serves both operations.
#[derive(Debug, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct AddressPayloadDto {
    pub region: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub apartment_number: Option<String>,
    #[validate(regex(path = *ZIP_RE, message = "zip code must be exactly 6 digits"))]
    pub zip_code: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AddressListQuery {
    /// Exact-match filter on city.
    pub city: Option<String>,
    /// Exact-match filter on street.
    pub street: Option<String>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

/// Page of addresses plus the total count of rows matching the filters.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddressListDto {
    pub count: u64,
    pub rows: Vec<AddressDto>,
}

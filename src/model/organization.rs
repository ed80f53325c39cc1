use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrganizationDto {
    pub organization_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub contact_person: Option<String>,
}

impl From<&entity::organization::Model> for OrganizationDto {
    fn from(model: &entity::organization::Model) -> Self {
        Self {
            organization_id: model.organization_id,
            name: model.name.clone(),
            address: model.address.clone(),
            phone_number: model.phone_number.clone(),
            contact_person: model.contact_person.clone(),
        }
    }
}

/// Payload for creating or updating an organization; `name` presence is
/// checked by the handler.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct OrganizationPayloadDto {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub contact_person: Option<String>,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::organization::OrganizationDto;

/// Verification record joined with the organization that performed it.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerificationDto {
    pub verification_id: i32,
    pub installed_equipment_id: Option<i32>,
    pub verification_date: NaiveDate,
    pub verifier_name: Option<String>,
    pub description: Option<String>,
    pub result: Option<String>,
    pub organization: Option<OrganizationDto>,
}

impl VerificationDto {
    pub fn from_model(
        model: &entity::verification::Model,
        organization: Option<&entity::organization::Model>,
    ) -> Self {
        Self {
            verification_id: model.verification_id,
            installed_equipment_id: model.installed_equipment_id,
            verification_date: model.verification_date,
            verifier_name: model.verifier_name.clone(),
            description: model.description.clone(),
            result: model.result.clone(),
            organization: organization.map(OrganizationDto::from),
        }
    }
}

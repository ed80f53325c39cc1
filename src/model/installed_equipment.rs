use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    equipment::{EquipmentDto, EquipmentStatusDto, EquipmentTypeDto},
    subscriber::SubscriberDto,
    verification::VerificationDto,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstalledEquipmentDto {
    pub installed_equipment_id: i32,
    pub subscriber_id: i32,
    pub agreement_id: i32,
    pub equipment_type_id: i32,
    pub status_id: Option<i32>,
    pub equipment_id: i32,
    pub installation_date: NaiveDate,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<&entity::installed_equipment::Model> for InstalledEquipmentDto {
    fn from(model: &entity::installed_equipment::Model) -> Self {
        Self {
            installed_equipment_id: model.installed_equipment_id,
            subscriber_id: model.subscriber_id,
            agreement_id: model.agreement_id,
            equipment_type_id: model.equipment_type_id,
            status_id: model.status_id,
            equipment_id: model.equipment_id,
            installation_date: model.installation_date,
            installation_location: model.installation_location.clone(),
            last_inspection_date: model.last_inspection_date,
            next_inspection_date: model.next_inspection_date,
            notes: model.notes.clone(),
        }
    }
}

/// Installed-equipment row joined with its reference data. `subscriber` and
/// `verifications` are only populated on endpoints that load them.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstalledEquipmentDetailDto {
    pub installed_equipment_id: i32,
    pub subscriber_id: i32,
    pub agreement_id: i32,
    pub installation_date: NaiveDate,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub equipment_type: Option<EquipmentTypeDto>,
    pub equipment_status: Option<EquipmentStatusDto>,
    pub equipment: Option<EquipmentDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<SubscriberDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verifications: Vec<VerificationDto>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateInstalledEquipmentDto {
    pub subscriber_id: Option<i32>,
    pub agreement_id: Option<i32>,
    pub equipment_type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update of an installed-equipment row.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateInstalledEquipmentDto {
    pub subscriber_id: Option<i32>,
    pub agreement_id: Option<i32>,
    pub equipment_type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub installation_location: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One item of a bulk update; items without `installed_equipment_id` are
/// skipped and excluded from the response.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct BatchUpdateItemDto {
    pub installed_equipment_id: Option<i32>,
    #[serde(flatten)]
    pub changes: UpdateInstalledEquipmentDto,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BatchCreateDto {
    pub equipment_items: Vec<CreateInstalledEquipmentDto>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BatchUpdateDto {
    pub equipment_items: Vec<BatchUpdateItemDto>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BatchResultDto {
    pub message: String,
    pub count: usize,
    pub data: Vec<InstalledEquipmentDto>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct InstalledEquipmentListQuery {
    pub subscriber_id: Option<i32>,
    pub equipment_type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    /// Case-insensitive substring match.
    pub installation_location: Option<String>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

/// Page of installed equipment plus the total count matching the filters.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InstalledEquipmentListDto {
    pub count: u64,
    pub rows: Vec<InstalledEquipmentDetailDto>,
}

/// A subscriber's installed equipment, newest installation first.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubscriberEquipmentDto {
    pub subscriber_id: i32,
    pub equipment_items: Vec<InstalledEquipmentDetailDto>,
}

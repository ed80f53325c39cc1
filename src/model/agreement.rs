use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::installed_equipment::InstalledEquipmentDetailDto;

/// Agreement row plus the computed count of installed equipment under it.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AgreementDto {
    pub agreement_id: i32,
    pub subscriber_id: i32,
    pub agreement_number: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(rename = "equipmentCount")]
    pub equipment_count: i64,
}

impl AgreementDto {
    pub fn from_model(model: &entity::agreement::Model, equipment_count: i64) -> Self {
        Self {
            agreement_id: model.agreement_id,
            subscriber_id: model.subscriber_id,
            agreement_number: model.agreement_number.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            notes: model.notes.clone(),
            equipment_count,
        }
    }
}

/// Bare agreement row, returned by create/update.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AgreementRowDto {
    pub agreement_id: i32,
    pub subscriber_id: i32,
    pub agreement_number: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<&entity::agreement::Model> for AgreementRowDto {
    fn from(model: &entity::agreement::Model) -> Self {
        Self {
            agreement_id: model.agreement_id,
            subscriber_id: model.subscriber_id,
            agreement_number: model.agreement_number.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            notes: model.notes.clone(),
        }
    }
}

/// Agreement with its installed-equipment line items, each joined with its
/// equipment type, status, and catalog entry.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AgreementDetailDto {
    pub agreement_id: i32,
    pub subscriber_id: i32,
    pub agreement_number: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub installed_equipment: Vec<InstalledEquipmentDetailDto>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateAgreementDto {
    pub subscriber_id: Option<i32>,
    pub agreement_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateAgreementDto {
    pub agreement_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

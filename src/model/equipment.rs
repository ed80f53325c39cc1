use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Catalog entries keep the original API's camelCase keys for the numeric
/// fields (`inspectionPeriod`, `serviceLife`, `hasThermometer`).
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EquipmentDto {
    pub equipment_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub power: Option<Decimal>,
    #[serde(rename = "inspectionPeriod")]
    pub inspection_period: Option<i32>,
    #[serde(rename = "serviceLife")]
    pub service_life: Option<i32>,
    #[serde(rename = "hasThermometer")]
    pub has_thermometer: Option<bool>,
}

impl From<&entity::equipment::Model> for EquipmentDto {
    fn from(model: &entity::equipment::Model) -> Self {
        Self {
            equipment_id: model.equipment_id,
            name: model.name.clone(),
            description: model.description.clone(),
            power: model.power,
            inspection_period: model.inspection_period,
            service_life: model.service_life,
            has_thermometer: model.has_thermometer,
        }
    }
}

/// Payload for creating or updating a catalog entry. Numeric fields arrive
/// from the form as empty strings when cleared, which normalize to NULL.
#[derive(Debug, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct EquipmentPayloadDto {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = validate_power))]
    pub power: Option<Decimal>,
    #[serde(default, rename = "inspectionPeriod", deserialize_with = "blank_as_none")]
    #[validate(range(min = 1, message = "inspection period must be a positive number"))]
    pub inspection_period: Option<i32>,
    #[serde(default, rename = "serviceLife", deserialize_with = "blank_as_none")]
    #[validate(range(min = 1, message = "service life must be a positive number"))]
    pub service_life: Option<i32>,
    #[serde(rename = "hasThermometer")]
    pub has_thermometer: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EquipmentTypeDto {
    pub equipment_type_id: i32,
    pub name: String,
}

impl From<&entity::equipment_type::Model> for EquipmentTypeDto {
    fn from(model: &entity::equipment_type::Model) -> Self {
        Self {
            equipment_type_id: model.equipment_type_id,
            name: model.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EquipmentStatusDto {
    pub status_id: i32,
    pub status_name: String,
    pub description: Option<String>,
}

impl From<&entity::equipment_status::Model> for EquipmentStatusDto {
    fn from(model: &entity::equipment_status::Model) -> Self {
        Self {
            status_id: model.status_id,
            status_name: model.status_name.clone(),
            description: model.description.clone(),
        }
    }
}

fn validate_power(power: &Decimal) -> Result<(), ValidationError> {
    if *power < Decimal::ZERO {
        let mut error = ValidationError::new("power");
        error.message = Some("power cannot be negative".into());
        return Err(error);
    }

    Ok(())
}

/// Treats JSON `null` and blank strings as absent, otherwise parses the value
/// whether it arrived as a number or a numeric string.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + serde::de::DeserializeOwned,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(raw)) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_power_becomes_none() {
        let dto: EquipmentPayloadDto =
            serde_json::from_value(serde_json::json!({ "name": "Boiler", "power": "" })).unwrap();

        assert!(dto.power.is_none());
    }

    #[test]
    fn numeric_string_power_parses() {
        let dto: EquipmentPayloadDto =
            serde_json::from_value(serde_json::json!({ "name": "Boiler", "power": "24.5" }))
                .unwrap();

        assert_eq!(dto.power, Some(Decimal::new(245, 1)));
    }

    #[test]
    fn negative_power_fails_validation() {
        let dto: EquipmentPayloadDto =
            serde_json::from_value(serde_json::json!({ "name": "Boiler", "power": "-1" })).unwrap();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn blank_inspection_period_becomes_none() {
        let dto: EquipmentPayloadDto =
            serde_json::from_value(serde_json::json!({ "name": "Boiler", "inspectionPeriod": "" }))
                .unwrap();

        assert!(dto.inspection_period.is_none());
    }
}

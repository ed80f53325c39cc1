//! Fixture helpers for inserting application rows into a test database.
//!
//! Each helper inserts one row with fixed filler values, returning the
//! created model so tests can chain foreign keys together.

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::subscriber::{ActivationEmailStatus, Role};
use rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

/// Hash a plaintext password the same way the application does.
pub fn hash_password(password: &str) -> Result<String, TestError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(hash)
}

/// A date that satisfies "in the past" checks without being suspiciously old.
pub fn past_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub async fn insert_address(db: &DatabaseConnection) -> Result<entity::address::Model, TestError> {
    let address = entity::address::ActiveModel {
        region: ActiveValue::Set(Some("Tver region".to_string())),
        district: ActiveValue::Set(None),
        city: ActiveValue::Set(Some("Tver".to_string())),
        street: ActiveValue::Set(Some("Sovetskaya".to_string())),
        house_number: ActiveValue::Set(Some("10".to_string())),
        apartment_number: ActiveValue::Set(Some("4".to_string())),
        zip_code: ActiveValue::Set("170100".to_string()),
        ..Default::default()
    };

    Ok(address.insert(db).await?)
}

/// Inserts a subscriber with a hashed password and no pending activation.
pub async fn insert_subscriber(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    is_activated: bool,
) -> Result<entity::subscriber::Model, TestError> {
    let now = Utc::now().naive_utc();
    let subscriber = entity::subscriber::ActiveModel {
        first_name: ActiveValue::Set("Ivan".to_string()),
        last_name: ActiveValue::Set("Petrov".to_string()),
        middle_name: ActiveValue::Set(None),
        date_of_birth: ActiveValue::Set(Some(past_date())),
        phone_number: ActiveValue::Set(Some("+71234567890".to_string())),
        email: ActiveValue::Set(Some(email.to_string())),
        snils: ActiveValue::Set(None),
        password: ActiveValue::Set(hash_password(password)?),
        is_activated: ActiveValue::Set(is_activated),
        activation_code: ActiveValue::Set(None),
        activation_code_expires: ActiveValue::Set(None),
        role: ActiveValue::Set(Role::User),
        activation_email_status: ActiveValue::Set(ActivationEmailStatus::Sent),
        address_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(subscriber.insert(db).await?)
}

/// Inserts an admin subscriber, activated and ready to log in.
pub async fn insert_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<entity::subscriber::Model, TestError> {
    let now = Utc::now().naive_utc();
    let subscriber = entity::subscriber::ActiveModel {
        first_name: ActiveValue::Set("Olga".to_string()),
        last_name: ActiveValue::Set("Sidorova".to_string()),
        middle_name: ActiveValue::Set(None),
        date_of_birth: ActiveValue::Set(None),
        phone_number: ActiveValue::Set(None),
        email: ActiveValue::Set(Some(email.to_string())),
        snils: ActiveValue::Set(None),
        password: ActiveValue::Set(hash_password(password)?),
        is_activated: ActiveValue::Set(true),
        activation_code: ActiveValue::Set(None),
        activation_code_expires: ActiveValue::Set(None),
        role: ActiveValue::Set(Role::Admin),
        activation_email_status: ActiveValue::Set(ActivationEmailStatus::Sent),
        address_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(subscriber.insert(db).await?)
}

/// Inserts an unactivated subscriber holding the provided activation code.
pub async fn insert_unactivated_subscriber(
    db: &DatabaseConnection,
    email: &str,
    activation_code: &str,
    activation_code_expires: NaiveDateTime,
) -> Result<entity::subscriber::Model, TestError> {
    let now = Utc::now().naive_utc();
    let subscriber = entity::subscriber::ActiveModel {
        first_name: ActiveValue::Set("Ivan".to_string()),
        last_name: ActiveValue::Set("Petrov".to_string()),
        middle_name: ActiveValue::Set(None),
        date_of_birth: ActiveValue::Set(None),
        phone_number: ActiveValue::Set(None),
        email: ActiveValue::Set(Some(email.to_string())),
        snils: ActiveValue::Set(None),
        password: ActiveValue::Set(hash_password("subscriber-password")?),
        is_activated: ActiveValue::Set(false),
        activation_code: ActiveValue::Set(Some(activation_code.to_string())),
        activation_code_expires: ActiveValue::Set(Some(activation_code_expires)),
        role: ActiveValue::Set(Role::User),
        activation_email_status: ActiveValue::Set(ActivationEmailStatus::Pending),
        address_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(subscriber.insert(db).await?)
}

pub async fn insert_equipment_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::equipment_type::Model, TestError> {
    let now = Utc::now().naive_utc();
    let equipment_type = entity::equipment_type::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(equipment_type.insert(db).await?)
}

pub async fn insert_equipment_status(
    db: &DatabaseConnection,
    status_name: &str,
) -> Result<entity::equipment_status::Model, TestError> {
    let now = Utc::now().naive_utc();
    let status = entity::equipment_status::ActiveModel {
        status_name: ActiveValue::Set(status_name.to_string()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(status.insert(db).await?)
}

pub async fn insert_equipment(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::equipment::Model, TestError> {
    let now = Utc::now().naive_utc();
    let equipment = entity::equipment::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        description: ActiveValue::Set(Some("Wall-mounted boiler".to_string())),
        power: ActiveValue::Set(Some(rust_decimal::Decimal::new(2400, 2))),
        inspection_period: ActiveValue::Set(Some(12)),
        service_life: ActiveValue::Set(Some(15)),
        has_thermometer: ActiveValue::Set(Some(true)),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(equipment.insert(db).await?)
}

pub async fn insert_organization(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::organization::Model, TestError> {
    let now = Utc::now().naive_utc();
    let organization = entity::organization::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        address: ActiveValue::Set(Some("Tver, Gagarina 3".to_string())),
        phone_number: ActiveValue::Set(Some("+74822000000".to_string())),
        contact_person: ActiveValue::Set(Some("A. Smirnov".to_string())),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(organization.insert(db).await?)
}

pub async fn insert_agreement(
    db: &DatabaseConnection,
    subscriber_id: i32,
    agreement_number: &str,
    start_date: NaiveDate,
) -> Result<entity::agreement::Model, TestError> {
    let agreement = entity::agreement::ActiveModel {
        subscriber_id: ActiveValue::Set(subscriber_id),
        agreement_number: ActiveValue::Set(agreement_number.to_string()),
        start_date: ActiveValue::Set(start_date),
        end_date: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        ..Default::default()
    };

    Ok(agreement.insert(db).await?)
}

pub async fn insert_installed_equipment(
    db: &DatabaseConnection,
    subscriber_id: i32,
    agreement_id: i32,
    equipment_type_id: i32,
    equipment_id: i32,
) -> Result<entity::installed_equipment::Model, TestError> {
    let now = Utc::now().naive_utc();
    let installed = entity::installed_equipment::ActiveModel {
        subscriber_id: ActiveValue::Set(subscriber_id),
        agreement_id: ActiveValue::Set(agreement_id),
        equipment_type_id: ActiveValue::Set(equipment_type_id),
        status_id: ActiveValue::Set(None),
        equipment_id: ActiveValue::Set(equipment_id),
        installation_date: ActiveValue::Set(past_date()),
        installation_location: ActiveValue::Set(Some("Kitchen".to_string())),
        last_inspection_date: ActiveValue::Set(None),
        next_inspection_date: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(installed.insert(db).await?)
}

pub async fn insert_verification(
    db: &DatabaseConnection,
    installed_equipment_id: i32,
    organization_id: i32,
) -> Result<entity::verification::Model, TestError> {
    let now = Utc::now().naive_utc();
    let verification = entity::verification::ActiveModel {
        installed_equipment_id: ActiveValue::Set(Some(installed_equipment_id)),
        organization_id: ActiveValue::Set(Some(organization_id)),
        verification_date: ActiveValue::Set(past_date()),
        verifier_name: ActiveValue::Set(Some("A. Smirnov".to_string())),
        description: ActiveValue::Set(None),
        result: ActiveValue::Set(Some("passed".to_string())),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(verification.insert(db).await?)
}

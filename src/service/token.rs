//! Bearer token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{config::Config, error::Error, model::auth::Claims};

/// Signs a token embedding the subscriber's id, email, role, and names.
///
/// Every issuance path uses the configured TTL so activation and login hand
/// out interchangeable tokens.
pub fn issue_token(subscriber: &entity::subscriber::Model, config: &Config) -> Result<String, Error> {
    let exp = (Utc::now() + Duration::days(config.token_ttl_days)).timestamp() as usize;

    let claims = Claims {
        id: subscriber.subscriber_id,
        email: subscriber.email.clone().unwrap_or_default(),
        role: subscriber.role,
        first_name: subscriber.first_name.clone(),
        last_name: subscriber.last_name.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )?;

    Ok(token)
}

/// Verifies the signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, secret_key: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_key.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

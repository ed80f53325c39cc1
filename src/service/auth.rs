//! Registration, activation, and login flow.
//!
//! Registration persists the subscriber before attempting the activation
//! email; the send outcome is recorded on the row and never fails the call.
//! The email send cannot join a database transaction, so the subscriber
//! insert, the send, and the status update are three independent steps —
//! resend covers recovery when the send is lost.

use chrono::{Duration, Utc};
use entity::subscriber::ActivationEmailStatus;
use rand::{distr::Alphanumeric, Rng};
use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::subscriber::{NewSubscriber, SubscriberRepository},
    error::{ApiError, Error},
    model::auth::{Claims, LoginDto, RegistrationDto},
    service::{mail::Mailer, password, token},
};

/// Activation codes are single-use and valid for 24 hours.
const ACTIVATION_CODE_TTL_HOURS: i64 = 24;
const ACTIVATION_CODE_LEN: usize = 32;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn Mailer,
    config: &'a Config,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, mailer: &'a dyn Mailer, config: &'a Config) -> Self {
        Self { db, mailer, config }
    }

    /// Registers a new subscriber and attempts the activation email.
    ///
    /// Fails with 400 when the email is already registered. Email delivery
    /// failure does not fail the registration; the outcome is recorded in
    /// `activation_email_status`.
    pub async fn register(&self, dto: RegistrationDto) -> Result<(), Error> {
        let repo = SubscriberRepository::new(self.db);

        if repo.find_by_email(&dto.email).await?.is_some() {
            return Err(ApiError::BadRequest(format!(
                "A subscriber with email {} already exists",
                dto.email
            ))
            .into());
        }

        let password_hash = password::hash_password(&dto.password)?;
        let activation_code = generate_activation_code();
        let expires = Utc::now().naive_utc() + Duration::hours(ACTIVATION_CODE_TTL_HOURS);

        let email = dto.email.clone();
        let subscriber = repo
            .create(NewSubscriber {
                first_name: dto.first_name,
                last_name: dto.last_name,
                middle_name: dto.middle_name,
                date_of_birth: dto.date_of_birth,
                phone_number: dto.phone_number,
                email: dto.email,
                snils: dto.snils,
                password_hash,
                activation_code: activation_code.clone(),
                activation_code_expires: expires,
            })
            .await?;

        self.send_and_record(subscriber.subscriber_id, &email, &activation_code)
            .await?;

        Ok(())
    }

    /// Re-sends the activation email, regenerating the code when none is
    /// stored. No-ops when the previous email already went out.
    pub async fn resend_activation(&self, email: &str) -> Result<&'static str, Error> {
        let repo = SubscriberRepository::new(self.db);

        let subscriber = match repo.find_by_email(email).await? {
            Some(subscriber) if !subscriber.is_activated => subscriber,
            _ => {
                return Err(ApiError::BadRequest(
                    "Subscriber not found or already activated".to_string(),
                )
                .into())
            }
        };

        if subscriber.activation_email_status == ActivationEmailStatus::Sent {
            return Ok("Activation email has already been sent");
        }

        let activation_code = subscriber
            .activation_code
            .clone()
            .unwrap_or_else(generate_activation_code);
        let expires = Utc::now().naive_utc() + Duration::hours(ACTIVATION_CODE_TTL_HOURS);

        let subscriber = repo
            .set_activation_code(subscriber, activation_code.clone(), expires)
            .await?;

        self.send_and_record(subscriber.subscriber_id, email, &activation_code)
            .await?;

        Ok("Activation email resent")
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller;
    /// an unactivated account is 403 rather than 401.
    pub async fn login(
        &self,
        dto: &LoginDto,
    ) -> Result<(entity::subscriber::Model, String), Error> {
        let repo = SubscriberRepository::new(self.db);

        let subscriber = repo
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(&dto.password, &subscriber.password) {
            return Err(ApiError::Unauthorized("Invalid email or password".to_string()).into());
        }

        if !subscriber.is_activated {
            return Err(ApiError::Forbidden(
                "Account is not activated. Please check your email.".to_string(),
            )
            .into());
        }

        let token = token::issue_token(&subscriber, self.config)?;

        Ok((subscriber, token))
    }

    /// Redeems an activation code.
    ///
    /// An expired code is cleared so later attempts with the same code fail
    /// as unknown rather than expired.
    pub async fn activate(
        &self,
        activation_code: &str,
    ) -> Result<(entity::subscriber::Model, String), Error> {
        let repo = SubscriberRepository::new(self.db);

        let subscriber = repo
            .find_by_activation_code(activation_code)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Invalid activation code".to_string()))?;

        let expired = match subscriber.activation_code_expires {
            Some(expires) => Utc::now().naive_utc() > expires,
            None => true,
        };

        if expired {
            repo.clear_activation_code(subscriber).await?;

            return Err(ApiError::BadRequest(
                "Activation code has expired. Please request a new code.".to_string(),
            )
            .into());
        }

        let subscriber = repo.activate(subscriber).await?;
        let token = token::issue_token(&subscriber, self.config)?;

        Ok((subscriber, token))
    }

    /// Re-validates a bearer against current subscriber state and issues a
    /// fresh token.
    pub async fn check(
        &self,
        claims: &Claims,
    ) -> Result<(entity::subscriber::Model, String), Error> {
        let repo = SubscriberRepository::new(self.db);

        let subscriber = repo
            .get(claims.id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Subscriber not found".to_string()))?;

        if !subscriber.is_activated {
            return Err(ApiError::Forbidden("Account is not activated.".to_string()).into());
        }

        let token = token::issue_token(&subscriber, self.config)?;

        Ok((subscriber, token))
    }

    async fn send_and_record(
        &self,
        subscriber_id: i32,
        email: &str,
        activation_code: &str,
    ) -> Result<(), Error> {
        let repo = SubscriberRepository::new(self.db);

        match self.mailer.send_activation_email(email, activation_code).await {
            Ok(()) => {
                tracing::info!(email, "activation email sent");
                repo.mark_email_status(subscriber_id, ActivationEmailStatus::Sent)
                    .await?;
            }
            Err(err) => {
                tracing::error!(email, %err, "failed to send activation email");
                repo.mark_email_status(subscriber_id, ActivationEmailStatus::Failed)
                    .await?;
            }
        }

        Ok(())
    }
}

fn generate_activation_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ACTIVATION_CODE_LEN)
        .map(char::from)
        .collect()
}

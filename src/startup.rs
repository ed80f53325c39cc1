use crate::{
    config::Config,
    error::Error,
    service::mail::{MailError, SmtpMailer},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the SMTP mailer from the configured relay credentials
pub fn build_mailer(config: &Config) -> Result<SmtpMailer, MailError> {
    SmtpMailer::from_config(config)
}

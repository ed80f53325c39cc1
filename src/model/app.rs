use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::Config, service::mail::Mailer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
}

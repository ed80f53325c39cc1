use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<argon2::password_hash::Error> for TestError {
    fn from(err: argon2::password_hash::Error) -> Self {
        TestError::PasswordHash(err.to_string())
    }
}

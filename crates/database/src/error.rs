use core_types::ValidationError;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Classifies an error raised by an INSERT/UPDATE/DELETE. Integrity
    /// violations reported by the database become `Constraint`.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::CheckViolation
            ) {
                return DbError::Constraint(db_err.message().to_string());
            }
        }
        DbError::ConnectionError(err)
    }
}

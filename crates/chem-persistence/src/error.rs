//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas del store de
//! compuestos. La traducción a `PipelineError` depende de la operación
//! (lectura => `StoreQuery`, escritura => `StoreWrite`) y se hace en `pg`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("not found")]
    NotFound,
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

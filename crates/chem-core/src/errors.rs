//! Taxonomía de errores del pipeline.
//!
//! Cada adaptador (store, proveedores HTTP, gate, conversor) tiene su propio
//! error local y lo traduce a `PipelineError` en la frontera del trait.
//! Todas las variantes son fatales para la corrida salvo `StoreWrite`, cuya
//! política decide `WriteFailurePolicy`.

use chem_domain::{CompoundId, DomainError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("store query failed: {0}")]
    StoreQuery(String),
    #[error("store write failed for compound {compound_id}: {reason}")]
    StoreWrite { compound_id: CompoundId, reason: String },
    #[error("lookup transport error ({url}): {reason}")]
    LookupTransport { url: String, reason: String },
    #[error("converter process error: {0}")]
    ConverterProcess(String),
    #[error("converter output error: {0}")]
    ConverterOutput(String),
    #[error("operator input error: {0}")]
    OperatorInput(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Clase de error para decidir si la corrida continúa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Aborta la corrida completa.
    Fatal,
    /// Sujeto a `WriteFailurePolicy`.
    BestEffort,
}

pub fn classify_error(e: &PipelineError) -> ErrorClass {
    match e {
        PipelineError::StoreWrite { .. } => ErrorClass::BestEffort,
        _ => ErrorClass::Fatal,
    }
}

impl From<DomainError> for PipelineError {
    fn from(e: DomainError) -> Self {
        PipelineError::Internal(e.to_string())
    }
}

//! Errores de los proveedores de búsqueda.
//! Mapea fallos de transporte/HTTP a la variante `LookupTransport` del core.

use chem_core::PipelineError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// DNS, TLS, timeout, conexión rechazada, lectura del cuerpo...
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },
    /// Status no-2xx distinto de 404.
    #[error("unexpected http status {status} for {url}")]
    Status { url: String, status: u16 },
}

impl From<ProviderError> for PipelineError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Transport { url, reason } => PipelineError::LookupTransport { url, reason },
            ProviderError::Status { url, status } => PipelineError::LookupTransport { url,
                                                                                      reason: format!("http status {status}") },
        }
    }
}

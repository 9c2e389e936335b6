use thiserror::Error;

/// Errores del modelo de dominio (registro de compuestos y contexto de
/// resolución).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Transición de etapa fuera del orden lineal del pipeline.
    #[error("Transición inválida: {from:?} -> {to:?}")]
    InvalidTransition { from: crate::RecordStage, to: crate::RecordStage },
    #[error("Codificación no es texto UTF-8: {0}")]
    EncodingNotText(String),
}

//! Puente con el conversor externo de estructuras.
//!
//! El conversor es un ejecutable sin argumentos que lee la notación desde
//! un archivo de entrada y escribe la codificación (CDX base64) en un
//! archivo de salida, ambos en su directorio de trabajo.
use chem_core::PipelineError;
use thiserror::Error;
pub mod config;
pub mod process;
pub use config::ConverterConfig;
pub use process::ProcessConverter;

#[derive(Debug, Error)]
pub enum ConverterError {
    #[error("no se pudo preparar el archivo de intercambio {path}: {reason}")]
    Handoff { path: String, reason: String },
    #[error("no se pudo iniciar el conversor {executable}: {reason}")]
    Spawn { executable: String, reason: String },
    #[error("el conversor terminó con {0}")]
    ExitStatus(String),
    #[error("el conversor excedió el tiempo límite de {0:?}")]
    Timeout(std::time::Duration),
    #[error("no se pudo leer la salida {path}: {reason}")]
    MissingOutput { path: String, reason: String },
    #[error("la salida {0} está vacía")]
    EmptyOutput(String),
}

impl From<ConverterError> for PipelineError {
    fn from(e: ConverterError) -> Self {
        match e {
            ConverterError::MissingOutput { .. } | ConverterError::EmptyOutput(_) => {
                PipelineError::ConverterOutput(e.to_string())
            }
            other => PipelineError::ConverterProcess(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn output_errors_map_to_converter_output() {
        let e: PipelineError = ConverterError::EmptyOutput("cdx.output".into()).into();
        assert!(matches!(e, PipelineError::ConverterOutput(_)));
        let e: PipelineError = ConverterError::ExitStatus("exit status: 1".into()).into();
        assert!(matches!(e, PipelineError::ConverterProcess(_)));
    }
}

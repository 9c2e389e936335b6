//! Políticas configurables de la corrida y resumen final.

use chem_domain::CompoundId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Qué hacer cuando, tras el gate, la notación queda vacía.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyNotationPolicy {
    /// No se invoca el conversor; el registro termina en `Skipped` sin
    /// escritura.
    #[default]
    Skip,
    /// Se invoca el conversor con notación vacía y se persiste lo que
    /// produzca (comportamiento histórico).
    Convert,
}

/// Qué hacer ante `PipelineError::StoreWrite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriteFailurePolicy {
    /// Log de error, se cuenta en el resumen y se continúa con el siguiente
    /// registro.
    #[default]
    Continue,
    /// Se aborta la corrida.
    Abort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub empty_notation: EmptyNotationPolicy,
    pub write_failure: WriteFailurePolicy,
    /// Procesa como máximo N registros seleccionados.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub compound_id: CompoundId,
    pub error: String,
}

/// Resumen de una corrida completa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    /// Registros seleccionados (tras aplicar `limit`).
    pub selected: usize,
    pub persisted: usize,
    pub skipped: usize,
    pub write_failures: Vec<WriteFailure>,
}

impl RunSummary {
    pub(crate) fn new(run_id: Uuid, selected: usize) -> Self {
        RunSummary { run_id,
                     selected,
                     persisted: 0,
                     skipped: 0,
                     write_failures: Vec::new() }
    }
}

/// Desenlace de un registro individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Persisted,
    Skipped,
    WriteFailed(String),
}

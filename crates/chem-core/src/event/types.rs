//! Tipos de evento del pipeline y estructura `PipelineEvent`.
//!
//! Rol en el pipeline:
//! - Cada corrida del `EnrichmentPipeline` emite eventos a un `EventLog`
//!   append-only (en memoria; no se persiste en el store de compuestos).
//! - Los eventos por registro siguen la máquina de estados lineal de
//!   `RecordStage`, lo que permite auditar qué etapa produjo cada valor.
use chem_domain::CompoundId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineEventKind {
    /// Primer evento de una corrida. Invariante: único por `run_id`.
    RunStarted { pipeline_version: String, selected: usize },
    RecordStarted { registry_number: String },
    IdentifierResolved { external_id: Option<String> },
    NotationResolved { notation: Option<String> },
    /// `overridden` indica que el operador reemplazó el valor resuelto.
    OverrideApplied { notation: String, overridden: bool },
    /// Se registra el fingerprint de la codificación, no el blob completo.
    Converted { bytes: usize, fingerprint: String },
    Persisted,
    Skipped { reason: String },
    /// Fallo de escritura tolerado por `WriteFailurePolicy::Continue`.
    WriteFailed { error: String },
    /// Error fatal: la corrida se detiene tras este evento.
    Aborted { error: String },
    RunCompleted { persisted: usize, skipped: usize, write_failures: usize },
}

impl PipelineEventKind {
    /// Nombre legible de la variante para logging/diagnóstico.
    pub fn variant_name(&self) -> &'static str {
        match self {
            PipelineEventKind::RunStarted { .. } => "RunStarted",
            PipelineEventKind::RecordStarted { .. } => "RecordStarted",
            PipelineEventKind::IdentifierResolved { .. } => "IdentifierResolved",
            PipelineEventKind::NotationResolved { .. } => "NotationResolved",
            PipelineEventKind::OverrideApplied { .. } => "OverrideApplied",
            PipelineEventKind::Converted { .. } => "Converted",
            PipelineEventKind::Persisted => "Persisted",
            PipelineEventKind::Skipped { .. } => "Skipped",
            PipelineEventKind::WriteFailed { .. } => "WriteFailed",
            PipelineEventKind::Aborted { .. } => "Aborted",
            PipelineEventKind::RunCompleted { .. } => "RunCompleted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub seq: u64, // asignado por el EventLog (orden append)
    pub run_id: Uuid,
    /// `None` para eventos de nivel corrida.
    pub compound_id: Option<CompoundId>,
    pub kind: PipelineEventKind,
    pub ts: DateTime<Utc>,
}

//! Orquestador del pipeline de enriquecimiento.

use chem_domain::{CompoundId, CompoundRecord, ResolutionContext};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::constants::PIPELINE_VERSION;
use crate::engine::{EmptyNotationPolicy, PipelineBuilder, PipelineOptions, RecordOutcome, RunSummary, WriteFailure,
                    WriteFailurePolicy};
use crate::errors::{classify_error, ErrorClass, PipelineError};
use crate::event::{EventLog, InMemoryEventLog, PipelineEvent, PipelineEventKind};
use crate::hashing::hash_bytes;
use crate::repo::CompoundStore;
use crate::step::{IdentifierResolver, NotationGate, NotationResolver, StructureConverter};

/// Pipeline secuencial: un registro se procesa por completo (identificador ->
/// notación -> gate -> conversión -> escritura) antes de iniciar el
/// siguiente.
///
/// Invariantes:
/// - Cualquier error distinto de `StoreWrite` aborta la corrida; no hay
///   reintentos.
/// - `StoreWrite` se trata según `WriteFailurePolicy`.
/// - Si no hay identificador externo no se consulta la notación.
pub struct EnrichmentPipeline<S, L = InMemoryEventLog>
    where S: CompoundStore,
          L: EventLog
{
    pub(crate) store: S,
    pub(crate) events: L,
    pub(crate) identifier: Box<dyn IdentifierResolver>,
    pub(crate) notation: Box<dyn NotationResolver>,
    pub(crate) gate: Box<dyn NotationGate>,
    pub(crate) converter: Box<dyn StructureConverter>,
    pub(crate) options: PipelineOptions,
    pub(crate) last_run_id: Option<Uuid>,
}

impl<S: CompoundStore> EnrichmentPipeline<S, InMemoryEventLog> {
    /// Crea un builder con el store obligatorio y log de eventos en memoria.
    #[inline]
    pub fn builder(store: S) -> PipelineBuilder<S, InMemoryEventLog> {
        PipelineBuilder::new(store)
    }
}

impl<S, L> EnrichmentPipeline<S, L>
    where S: CompoundStore,
          L: EventLog
{
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Eventos de la última corrida (vacío si aún no se ejecutó).
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.last_run_id.map(|id| self.events.list(id)).unwrap_or_default()
    }

    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }

    /// Devuelve el store (para inspección tras la corrida).
    pub fn into_store(self) -> S {
        self.store
    }

    fn emit(&mut self, run_id: Uuid, compound_id: Option<CompoundId>, kind: PipelineEventKind) {
        let ev = self.events.append_kind(run_id, compound_id, kind);
        debug!("event run_id={run_id} seq={} compound={:?} kind={}",
               ev.seq,
               ev.compound_id,
               ev.kind.variant_name());
    }

    /// Ejecuta una pasada completa sobre los registros no enriquecidos.
    pub fn run(&mut self) -> Result<RunSummary, PipelineError> {
        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);
        info!("run:start run_id={run_id} version={PIPELINE_VERSION}");

        let mut records = self.store.select_unenriched().map_err(|e| {
                                                             error!("run:select error run_id={run_id} err={e}");
                                                             e
                                                         })?;
        if let Some(limit) = self.options.limit {
            records.truncate(limit);
        }
        info!("run:selected run_id={run_id} count={}", records.len());
        self.emit(run_id,
                  None,
                  PipelineEventKind::RunStarted { pipeline_version: PIPELINE_VERSION.to_string(),
                                                  selected: records.len() });

        let mut summary = RunSummary::new(run_id, records.len());
        for record in records {
            let compound_id = record.compound_id;
            match self.process_record(run_id, record) {
                Ok(RecordOutcome::Persisted) => summary.persisted += 1,
                Ok(RecordOutcome::Skipped) => summary.skipped += 1,
                Ok(RecordOutcome::WriteFailed(error)) => summary.write_failures.push(WriteFailure { compound_id, error }),
                Err(e) => {
                    error!("run:abort run_id={run_id} compound={compound_id} err={e}");
                    self.emit(run_id, Some(compound_id), PipelineEventKind::Aborted { error: e.to_string() });
                    return Err(e);
                }
            }
        }

        self.emit(run_id,
                  None,
                  PipelineEventKind::RunCompleted { persisted: summary.persisted,
                                                    skipped: summary.skipped,
                                                    write_failures: summary.write_failures.len() });
        info!("run:done run_id={run_id} selected={} persisted={} skipped={} write_failures={}",
              summary.selected,
              summary.persisted,
              summary.skipped,
              summary.write_failures.len());
        Ok(summary)
    }

    /// Procesa un registro recorriendo la máquina de estados de
    /// `ResolutionContext`.
    fn process_record(&mut self, run_id: Uuid, record: CompoundRecord) -> Result<RecordOutcome, PipelineError> {
        let id = record.compound_id;
        info!("record:start compound={id} cas={:?} name={:?}", record.registry_number, record.substance_name);
        self.gate.announce(&record)?;
        let mut ctx = ResolutionContext::new(record);
        self.emit(run_id,
                  Some(id),
                  PipelineEventKind::RecordStarted { registry_number: ctx.registry_number().to_string() });

        // START -> IDENTIFIER_RESOLVED
        let external_id = self.identifier.resolve_identifier(ctx.registry_number())?;
        if external_id.is_none() {
            info!("record:identifier not found compound={id}");
        }
        ctx.identifier_resolved(external_id.clone())?;
        self.emit(run_id, Some(id), PipelineEventKind::IdentifierResolved { external_id });

        // IDENTIFIER_RESOLVED -> NOTATION_RESOLVED
        let notation = match ctx.external_compound_id() {
            Some(cid) => self.notation.resolve_notation(cid)?,
            None => None,
        };
        ctx.notation_resolved(notation.clone())?;
        self.emit(run_id, Some(id), PipelineEventKind::NotationResolved { notation });

        // NOTATION_RESOLVED -> OVERRIDE_APPLIED
        let final_notation = self.gate.confirm_or_override(ctx.notation())?;
        let overridden = final_notation != ctx.notation().unwrap_or("");
        ctx.override_applied(final_notation.clone())?;
        self.emit(run_id,
                  Some(id),
                  PipelineEventKind::OverrideApplied { notation: final_notation, overridden });

        if ctx.notation().is_none() && self.options.empty_notation == EmptyNotationPolicy::Skip {
            ctx.skipped()?;
            warn!("record:skipped compound={id} reason=empty notation");
            self.emit(run_id,
                      Some(id),
                      PipelineEventKind::Skipped { reason: "empty notation".into() });
            return Ok(RecordOutcome::Skipped);
        }

        // OVERRIDE_APPLIED -> CONVERTED
        let encoding = self.converter.convert(ctx.notation().unwrap_or(""))?;
        if !encoding.matches_sentinel() {
            warn!("record:convert compound={id} output does not start with the enriched sentinel; it will be selected again");
        }
        let bytes = encoding.len();
        let fingerprint = hash_bytes(encoding.as_bytes());
        ctx.converted(encoding)?;
        self.emit(run_id, Some(id), PipelineEventKind::Converted { bytes, fingerprint });

        // CONVERTED -> PERSISTED
        let write = match ctx.structure_encoding() {
            Some(enc) => self.store.write_encoding(id, enc),
            None => Err(PipelineError::Internal("converted context without encoding".into())),
        };
        match write {
            Ok(()) => {
                ctx.persisted()?;
                info!("record:persisted compound={id} bytes={bytes}");
                self.emit(run_id, Some(id), PipelineEventKind::Persisted);
                Ok(RecordOutcome::Persisted)
            }
            Err(e) if classify_error(&e) == ErrorClass::BestEffort
                      && self.options.write_failure == WriteFailurePolicy::Continue =>
            {
                error!("record:write failed compound={id} err={e} (continuing)");
                self.emit(run_id, Some(id), PipelineEventKind::WriteFailed { error: e.to_string() });
                Ok(RecordOutcome::WriteFailed(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

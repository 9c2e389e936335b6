//! Builder para `EnrichmentPipeline`.
//!
//! El store es obligatorio desde el inicio (`EnrichmentPipeline::builder`);
//! las cuatro capacidades por etapa se registran después y `build` verifica
//! que estén todas presentes.
//!
//! ```ignore
//! let mut pipeline = EnrichmentPipeline::builder(store)
//!     .identifier_resolver(resolver)
//!     .notation_resolver(notation)
//!     .gate(gate)
//!     .converter(converter)
//!     .options(PipelineOptions::default())
//!     .build()?;
//! let summary = pipeline.run()?;
//! ```

use crate::engine::{EnrichmentPipeline, PipelineOptions};
use crate::errors::PipelineError;
use crate::event::{EventLog, InMemoryEventLog};
use crate::repo::CompoundStore;
use crate::step::{IdentifierResolver, NotationGate, NotationResolver, StructureConverter};

pub struct PipelineBuilder<S: CompoundStore, L: EventLog = InMemoryEventLog> {
    store: S,
    events: L,
    identifier: Option<Box<dyn IdentifierResolver>>,
    notation: Option<Box<dyn NotationResolver>>,
    gate: Option<Box<dyn NotationGate>>,
    converter: Option<Box<dyn StructureConverter>>,
    options: PipelineOptions,
}

impl<S: CompoundStore> PipelineBuilder<S, InMemoryEventLog> {
    pub(crate) fn new(store: S) -> Self {
        PipelineBuilder { store,
                          events: InMemoryEventLog::default(),
                          identifier: None,
                          notation: None,
                          gate: None,
                          converter: None,
                          options: PipelineOptions::default() }
    }
}

impl<S: CompoundStore, L: EventLog> PipelineBuilder<S, L> {
    /// Reemplaza el log de eventos en memoria por otro backend.
    pub fn event_log<L2: EventLog>(self, events: L2) -> PipelineBuilder<S, L2> {
        PipelineBuilder { store: self.store,
                          events,
                          identifier: self.identifier,
                          notation: self.notation,
                          gate: self.gate,
                          converter: self.converter,
                          options: self.options }
    }

    pub fn identifier_resolver(mut self, r: impl IdentifierResolver + 'static) -> Self {
        self.identifier = Some(Box::new(r));
        self
    }

    pub fn notation_resolver(mut self, r: impl NotationResolver + 'static) -> Self {
        self.notation = Some(Box::new(r));
        self
    }

    pub fn gate(mut self, g: impl NotationGate + 'static) -> Self {
        self.gate = Some(Box::new(g));
        self
    }

    pub fn converter(mut self, c: impl StructureConverter + 'static) -> Self {
        self.converter = Some(Box::new(c));
        self
    }

    pub fn options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Consume el builder. Falla con `PipelineError::Internal` si falta alguna
    /// capacidad.
    pub fn build(self) -> Result<EnrichmentPipeline<S, L>, PipelineError> {
        let missing = |what: &str| PipelineError::Internal(format!("pipeline builder: missing {what}"));
        Ok(EnrichmentPipeline { store: self.store,
                                events: self.events,
                                identifier: self.identifier.ok_or_else(|| missing("identifier resolver"))?,
                                notation: self.notation.ok_or_else(|| missing("notation resolver"))?,
                                gate: self.gate.ok_or_else(|| missing("override gate"))?,
                                converter: self.converter.ok_or_else(|| missing("structure converter"))?,
                                options: self.options,
                                last_run_id: None })
    }
}

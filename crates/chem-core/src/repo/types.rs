//! Contrato del store de compuestos y backend en memoria.
//!
//! El backend Postgres vive en `chem-persistence`; el backend en memoria
//! replica exactamente el mismo predicado de selección y se usa en tests y
//! corridas de ensayo.
use std::collections::HashSet;

use chem_domain::{CompoundId, CompoundRecord, StructureEncoding};

use crate::errors::PipelineError;

/// Adaptador de lectura/escritura del inventario. No contiene lógica más allá
/// de la consulta parametrizada y la actualización por clave.
pub trait CompoundStore {
    /// Registros cuya codificación no coincide con el centinela de
    /// enriquecido. Error => `PipelineError::StoreQuery` (fatal).
    fn select_unenriched(&self) -> Result<Vec<CompoundRecord>, PipelineError>;
    /// Actualiza la codificación de un único registro. Error =>
    /// `PipelineError::StoreWrite`.
    fn write_encoding(&mut self, compound_id: CompoundId, encoding: &StructureEncoding) -> Result<(), PipelineError>;
}

/// Store en memoria con registro de escrituras (para aserciones en tests).
#[derive(Debug, Default)]
pub struct InMemoryCompoundStore {
    records: Vec<CompoundRecord>,
    /// Escrituras aplicadas, en orden.
    pub writes: Vec<(CompoundId, StructureEncoding)>,
    failing_writes: HashSet<CompoundId>,
    select_calls: std::cell::Cell<usize>,
}

impl InMemoryCompoundStore {
    pub fn new(records: Vec<CompoundRecord>) -> Self {
        Self { records, ..Default::default() }
    }

    /// Simula un fallo de escritura para `compound_id`.
    pub fn with_failing_write(mut self, compound_id: CompoundId) -> Self {
        self.failing_writes.insert(compound_id);
        self
    }

    pub fn get(&self, compound_id: CompoundId) -> Option<&CompoundRecord> {
        self.records.iter().find(|r| r.compound_id == compound_id)
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.get()
    }
}

impl CompoundStore for InMemoryCompoundStore {
    fn select_unenriched(&self) -> Result<Vec<CompoundRecord>, PipelineError> {
        self.select_calls.set(self.select_calls.get() + 1);
        Ok(self.records.iter().filter(|r| !r.is_enriched()).cloned().collect())
    }

    fn write_encoding(&mut self, compound_id: CompoundId, encoding: &StructureEncoding) -> Result<(), PipelineError> {
        if self.failing_writes.contains(&compound_id) {
            return Err(PipelineError::StoreWrite { compound_id,
                                                   reason: "simulated write failure".into() });
        }
        let text = encoding.as_text()
                           .map_err(|e| PipelineError::StoreWrite { compound_id, reason: e.to_string() })?
                           .to_string();
        let record = self.records
                         .iter_mut()
                         .find(|r| r.compound_id == compound_id)
                         .ok_or_else(|| PipelineError::StoreWrite { compound_id,
                                                                    reason: "no row matched".into() })?;
        record.structure_encoding = Some(text);
        self.writes.push((compound_id, encoding.clone()));
        Ok(())
    }
}

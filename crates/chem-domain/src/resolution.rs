//! Contexto transitorio de resolución por registro.
//!
//! Rol en el pipeline:
//! - El orquestador crea un `ResolutionContext` por cada `CompoundRecord`
//!   seleccionado y lo descarta tras la escritura (o ante un error fatal).
//! - `RecordStage` modela la máquina de estados lineal; el contexto sólo
//!   permite avanzar a la etapa inmediatamente siguiente o a `Skipped`.

use serde::{Deserialize, Serialize};

use crate::{CompoundRecord, DomainError, StructureEncoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStage {
    Start,
    IdentifierResolved,
    NotationResolved,
    OverrideApplied,
    Converted,
    /// Terminal: codificación persistida.
    Persisted,
    /// Terminal: sin notación tras el gate; no se invoca el conversor.
    Skipped,
}

impl RecordStage {
    /// Siguiente etapa del camino feliz. `None` para etapas terminales.
    pub fn next(self) -> Option<RecordStage> {
        match self {
            RecordStage::Start => Some(RecordStage::IdentifierResolved),
            RecordStage::IdentifierResolved => Some(RecordStage::NotationResolved),
            RecordStage::NotationResolved => Some(RecordStage::OverrideApplied),
            RecordStage::OverrideApplied => Some(RecordStage::Converted),
            RecordStage::Converted => Some(RecordStage::Persisted),
            RecordStage::Persisted | RecordStage::Skipped => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RecordStage::Persisted | RecordStage::Skipped)
    }
}

/// Valor por-registro propiedad exclusiva del orquestador.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub record: CompoundRecord,
    stage: RecordStage,
    external_compound_id: Option<String>,
    notation: Option<String>,
    structure_encoding: Option<StructureEncoding>,
}

impl ResolutionContext {
    pub fn new(record: CompoundRecord) -> Self {
        ResolutionContext { record,
                            stage: RecordStage::Start,
                            external_compound_id: None,
                            notation: None,
                            structure_encoding: None }
    }

    pub fn stage(&self) -> RecordStage {
        self.stage
    }
    pub fn registry_number(&self) -> &str {
        &self.record.registry_number
    }
    pub fn external_compound_id(&self) -> Option<&str> {
        self.external_compound_id.as_deref()
    }
    pub fn notation(&self) -> Option<&str> {
        self.notation.as_deref()
    }
    pub fn structure_encoding(&self) -> Option<&StructureEncoding> {
        self.structure_encoding.as_ref()
    }

    fn advance(&mut self, to: RecordStage) -> Result<(), DomainError> {
        let allowed = match to {
            RecordStage::Skipped => !self.stage.is_terminal() && self.stage != RecordStage::Converted,
            other => self.stage.next() == Some(other),
        };
        if !allowed {
            return Err(DomainError::InvalidTransition { from: self.stage, to });
        }
        self.stage = to;
        Ok(())
    }

    pub fn identifier_resolved(&mut self, external_id: Option<String>) -> Result<(), DomainError> {
        self.advance(RecordStage::IdentifierResolved)?;
        self.external_compound_id = external_id;
        Ok(())
    }

    pub fn notation_resolved(&mut self, notation: Option<String>) -> Result<(), DomainError> {
        self.advance(RecordStage::NotationResolved)?;
        self.notation = notation;
        Ok(())
    }

    /// Aplica la notación final devuelta por el gate. Una cadena vacía se
    /// guarda como ausencia de notación.
    pub fn override_applied(&mut self, notation: String) -> Result<(), DomainError> {
        self.advance(RecordStage::OverrideApplied)?;
        self.notation = if notation.is_empty() { None } else { Some(notation) };
        Ok(())
    }

    pub fn converted(&mut self, encoding: StructureEncoding) -> Result<(), DomainError> {
        self.advance(RecordStage::Converted)?;
        self.structure_encoding = Some(encoding);
        Ok(())
    }

    pub fn persisted(&mut self) -> Result<(), DomainError> {
        self.advance(RecordStage::Persisted)
    }

    pub fn skipped(&mut self) -> Result<(), DomainError> {
        self.advance(RecordStage::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_path_reaches_persisted() {
        let mut ctx = ResolutionContext::new(CompoundRecord::new(7, "64-17-5", "Ethanol"));
        ctx.identifier_resolved(Some("702".into())).unwrap();
        ctx.notation_resolved(Some("CCO".into())).unwrap();
        ctx.override_applied("CCO".into()).unwrap();
        ctx.converted(StructureEncoding::from("CCO")).unwrap();
        ctx.persisted().unwrap();
        assert_eq!(ctx.stage(), RecordStage::Persisted);
        assert_eq!(ctx.external_compound_id(), Some("702"));
        assert_eq!(ctx.notation(), Some("CCO"));
    }

    #[test]
    fn out_of_order_transition_is_rejected() {
        let mut ctx = ResolutionContext::new(CompoundRecord::new(1, "", ""));
        let err = ctx.notation_resolved(None).unwrap_err();
        assert_eq!(err,
                   DomainError::InvalidTransition { from: RecordStage::Start,
                                                    to: RecordStage::NotationResolved });
        assert_eq!(ctx.stage(), RecordStage::Start);
    }

    #[test]
    fn empty_override_clears_notation_and_allows_skip() {
        let mut ctx = ResolutionContext::new(CompoundRecord::new(1, "", ""));
        ctx.identifier_resolved(None).unwrap();
        ctx.notation_resolved(None).unwrap();
        ctx.override_applied(String::new()).unwrap();
        assert_eq!(ctx.notation(), None);
        ctx.skipped().unwrap();
        assert!(ctx.stage().is_terminal());
        assert!(ctx.skipped().is_err(), "no se sale de un estado terminal");
    }
}

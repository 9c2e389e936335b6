use chem_domain::{CompoundRecord, StructureEncoding};

use crate::errors::PipelineError;

/// Resuelve un identificador externo (CID) a partir de un número de registro.
pub trait IdentifierResolver {
    /// `Ok(None)` es un resultado normal ("no encontrado"), nunca un error.
    /// Un número de registro vacío devuelve `Ok(None)` sin tráfico de red.
    fn resolve_identifier(&self, registry_number: &str) -> Result<Option<String>, PipelineError>;
}

/// Resuelve la notación canónica (SMILES) de un identificador externo.
pub trait NotationResolver {
    fn resolve_notation(&self, external_compound_id: &str) -> Result<Option<String>, PipelineError>;
}

/// Gate de override manual.
pub trait NotationGate {
    /// Presenta el registro antes de la confirmación. Por defecto no hace nada.
    fn announce(&mut self, _record: &CompoundRecord) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Devuelve la notación final. Puede ser vacía si ni la resolución ni el
    /// operador aportaron valor.
    fn confirm_or_override(&mut self, resolved: Option<&str>) -> Result<String, PipelineError>;
}

/// Conversor notación -> codificación. No es seguro para uso concurrente si
/// la implementación usa archivos de intercambio fijos.
pub trait StructureConverter {
    fn convert(&self, notation: &str) -> Result<StructureEncoding, PipelineError>;
}

//! Constantes del pipeline de enriquecimiento.

/// Versión lógica del pipeline. Se registra en el evento `RunStarted` para
/// poder correlacionar logs de corridas con cambios de comportamiento
/// (política de notación vacía, extractores, etc.).
pub const PIPELINE_VERSION: &str = "E1.0";

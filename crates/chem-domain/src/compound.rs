// compound.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Prefijo base64 de un documento CDX (`VjCD0100...`). Un registro cuya
/// codificación empieza con este prefijo se considera ya enriquecido.
pub const ENRICHED_SENTINEL: &str = "Vmp";

/// Clave primaria opaca del registro en el inventario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundId(pub i32);

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CompoundId {
    fn from(v: i32) -> Self {
        CompoundId(v)
    }
}

/// Registro de compuesto tal como se lee del store.
///
/// Se lee una sola vez por pasada del pipeline y sólo se muta mediante la
/// escritura final de `structure_encoding`. Nunca se elimina.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub compound_id: CompoundId,
    /// Número de registro (CAS). Vacío si la columna es NULL.
    pub registry_number: String,
    pub substance_name: String,
    /// Codificación actual (base64 CDX); `None` si la columna es NULL.
    pub structure_encoding: Option<String>,
}

impl CompoundRecord {
    pub fn new(compound_id: impl Into<CompoundId>, registry_number: &str, substance_name: &str) -> Self {
        CompoundRecord { compound_id: compound_id.into(),
                         registry_number: registry_number.to_string(),
                         substance_name: substance_name.to_string(),
                         structure_encoding: None }
    }

    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.structure_encoding = Some(encoding.to_string());
        self
    }

    /// `true` si la codificación coincide con el patrón centinela. Es el
    /// complemento exacto del predicado de selección del store.
    pub fn is_enriched(&self) -> bool {
        self.structure_encoding
            .as_deref()
            .map(|e| e.starts_with(ENRICHED_SENTINEL))
            .unwrap_or(false)
    }
}

impl fmt::Display for CompoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<compound {}: cas={} name={}>", self.compound_id, self.registry_number, self.substance_name)
    }
}

/// Salida binaria (texto base64 en la práctica) del conversor externo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureEncoding(Vec<u8>);

impl StructureEncoding {
    pub fn new(bytes: Vec<u8>) -> Self {
        StructureEncoding(bytes)
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Vista de texto para la columna del store.
    pub fn as_text(&self) -> Result<&str, DomainError> {
        std::str::from_utf8(&self.0).map_err(|e| DomainError::EncodingNotText(e.to_string()))
    }
    /// `true` si la codificación, una vez persistida, dejará de ser
    /// seleccionada en la siguiente pasada.
    pub fn matches_sentinel(&self) -> bool {
        self.0.starts_with(ENRICHED_SENTINEL.as_bytes())
    }
}

impl From<&str> for StructureEncoding {
    fn from(s: &str) -> Self {
        StructureEncoding(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enriched_only_when_sentinel_prefix() {
        let r = CompoundRecord::new(1, "64-17-5", "Ethanol");
        assert!(!r.is_enriched(), "NULL no es enriquecido");
        assert!(r.clone().with_encoding("VmpDRDAxMDAEAwIBAAAA").is_enriched());
        assert!(!r.clone().with_encoding("NULL").is_enriched());
        assert!(!r.with_encoding("").is_enriched());
    }

    #[test]
    fn encoding_text_view_rejects_invalid_utf8() {
        let ok = StructureEncoding::from("VmpDRDAx");
        assert_eq!(ok.as_text().unwrap(), "VmpDRDAx");
        assert!(ok.matches_sentinel());
        let bad = StructureEncoding::new(vec![0xff, 0xfe]);
        assert!(matches!(bad.as_text(), Err(DomainError::EncodingNotText(_))));
        assert!(!bad.matches_sentinel());
    }
}

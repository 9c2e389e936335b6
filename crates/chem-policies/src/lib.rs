//! chem-policies – Política del gate de override manual
//!
//! Decide si el operador confirma o reemplaza la notación resuelta antes de
//! la conversión. Provee la política (`OverridePolicy`) y el gate de consola
//! (`OverrideGate`) que implementa `chem_core::NotationGate`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod gate;

pub use gate::OverrideGate;

/// Cuándo se consulta al operador.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OverridePolicy {
    /// Nunca pregunta: acepta la notación resuelta.
    Auto,
    /// Pregunta por registro; línea vacía o EOF aceptan el default.
    #[default]
    Interactive,
    /// Pregunta hasta recibir una línea no vacía; EOF es error.
    Forced,
}

impl OverridePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverridePolicy::Auto => "auto",
            OverridePolicy::Interactive => "interactive",
            OverridePolicy::Forced => "forced",
        }
    }
}

impl fmt::Display for OverridePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("política de override desconocida: {0} (auto|interactive|forced)")]
pub struct UnknownPolicy(pub String);

impl FromStr for OverridePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(OverridePolicy::Auto),
            "interactive" => Ok(OverridePolicy::Interactive),
            "forced" => Ok(OverridePolicy::Forced),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

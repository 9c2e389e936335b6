//! Capacidades por etapa que el pipeline secuencia para cada registro.
//!
//! Cada trait representa una frontera externa (HTTP, terminal, proceso
//! externo) para que el orquestador no dependa de ninguna implementación
//! concreta:
//! - `IdentifierResolver`: número de registro -> identificador externo.
//! - `NotationResolver`: identificador externo -> notación canónica.
//! - `NotationGate`: confirmación/override por un operador.
//! - `StructureConverter`: notación -> codificación binaria.

pub mod definition;

pub use definition::{IdentifierResolver, NotationGate, NotationResolver, StructureConverter};

//! chem-providers
//!
//! Resolutores de búsqueda externa (PubChem) para el pipeline:
//! - `transport`: frontera HTTP (`HttpTransport`) con implementación `ureq`
//!   bloqueante y un transporte estático para tests.
//! - `extract`: estrategias de extracción (`MarkerSpec` por marcadores y
//!   `StructuredSmiles` por parseo JSON) detrás del trait `Extractor`.
//! - `pubchem`: `PubChemIdentifierResolver` (CAS -> CID) y
//!   `PubChemNotationResolver` (CID -> SMILES canónico).
//! - `template`: sustitución de placeholders en URLs.

pub mod config;
pub mod error;
pub mod extract;
pub mod pubchem;
pub mod template;
pub mod transport;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use extract::{Extractor, FirstMatch, MarkerSpec, StructuredSmiles};
pub use pubchem::{PubChemIdentifierResolver, PubChemNotationResolver};
pub use transport::{HttpResponse, HttpTransport, StaticTransport, UreqTransport};

//! ChemFlow Enrich
//!
//! Fachada del workspace de enriquecimiento de compuestos:
//! - `domain`: registro de compuesto, número de registro y máquina de estados.
//! - `pipeline`: contratos (`CompoundStore`, resolutores, gate, conversor) y el
//!   `EnrichmentPipeline`.
//! - `persistence`: store Postgres (Diesel).
//! - `providers`: resolutores PubChem sobre HTTP.
//! - `policies`: gate de override manual.
//! - `engine`: puente con el conversor externo.
//!
//! El binario `chem-enrich` (crate `chem-cli`) cablea todo lo anterior.

pub use chem_core as pipeline;
pub use chem_domain as domain;
pub use chem_persistence as persistence;
pub use chem_policies as policies;
pub use chem_providers as providers;
pub use chemengine as engine;

pub use chem_core::{EnrichmentPipeline, PipelineError, PipelineOptions, RunSummary};
pub use chem_domain::{CompoundId, CompoundRecord, StructureEncoding};

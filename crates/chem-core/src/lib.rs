//! chem-core: Orquestador secuencial de enriquecimiento de compuestos.
//!
//! Define los contratos que el resto del workspace implementa:
//! - `CompoundStore` (chem-persistence / en memoria).
//! - `IdentifierResolver` y `NotationResolver` (chem-providers).
//! - `NotationGate` (chem-policies).
//! - `StructureConverter` (chemengine).
//!
//! y el `EnrichmentPipeline` que los secuencia por registro.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod repo;
pub mod step;

pub use engine::{EmptyNotationPolicy, EnrichmentPipeline, PipelineBuilder, PipelineOptions, RunSummary, WriteFailurePolicy};
pub use errors::PipelineError;
pub use event::{EventLog, InMemoryEventLog, PipelineEvent, PipelineEventKind};
pub use repo::{CompoundStore, InMemoryCompoundStore};
pub use step::{IdentifierResolver, NotationGate, NotationResolver, StructureConverter};

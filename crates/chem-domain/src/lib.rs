// chem-domain library entry point
pub mod compound;
pub mod error;
pub mod registry;
pub mod resolution;
pub use compound::{CompoundId, CompoundRecord, StructureEncoding, ENRICHED_SENTINEL};
pub use error::DomainError;
pub use registry::RegistryNumber;
pub use resolution::{RecordStage, ResolutionContext};

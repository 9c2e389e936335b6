//! Definiciones de eventos de corrida y trait EventLog.

mod types;
mod store;

pub use types::{PipelineEvent, PipelineEventKind};
pub use store::EventLog;
pub use store::InMemoryEventLog;

use std::collections::HashMap;
use chrono::Utc;
use chem_domain::CompoundId;
use uuid::Uuid;

use super::{PipelineEvent, PipelineEventKind};

/// Log de eventos append-only.
pub trait EventLog {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, run_id: Uuid, compound_id: Option<CompoundId>, kind: PipelineEventKind) -> PipelineEvent;
    /// Lista eventos de una corrida (orden ascendente por seq).
    fn list(&self, run_id: Uuid) -> Vec<PipelineEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventLog { pub inner: HashMap<Uuid, Vec<PipelineEvent>> }

impl EventLog for InMemoryEventLog {
    fn append_kind(&mut self, run_id: Uuid, compound_id: Option<CompoundId>, kind: PipelineEventKind) -> PipelineEvent {
        let vec = self.inner.entry(run_id).or_default();
        let seq = vec.len() as u64;
        let ev = PipelineEvent { seq, run_id, compound_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }
    fn list(&self, run_id: Uuid) -> Vec<PipelineEvent> { self.inner.get(&run_id).cloned().unwrap_or_default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_per_run_and_monotonic() {
        let mut log = InMemoryEventLog::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        log.append_kind(a, None, PipelineEventKind::RunStarted { pipeline_version: "t".into(), selected: 0 });
        let e = log.append_kind(a, Some(CompoundId(1)), PipelineEventKind::Persisted);
        let f = log.append_kind(b, None, PipelineEventKind::RunStarted { pipeline_version: "t".into(), selected: 2 });
        assert_eq!(e.seq, 1);
        assert_eq!(f.seq, 0);
        assert_eq!(log.list(a).len(), 2);
        assert!(log.list(Uuid::new_v4()).is_empty());
    }
}

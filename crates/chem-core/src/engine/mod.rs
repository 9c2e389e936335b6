//! Engine module for the enrichment pipeline
//!
//! Provides the orchestrator, its builder, and the run policies/summary.

pub mod builder;
pub mod core;
pub mod options;

pub use builder::PipelineBuilder;
pub use core::EnrichmentPipeline;
pub use options::{EmptyNotationPolicy, PipelineOptions, RecordOutcome, RunSummary, WriteFailure, WriteFailurePolicy};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipelineError;
    use crate::event::PipelineEventKind;
    use crate::repo::InMemoryCompoundStore;
    use crate::step::{IdentifierResolver, NotationGate, NotationResolver, StructureConverter};
    use chem_domain::{CompoundId, CompoundRecord, StructureEncoding};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    // Resolver de tabla fija: CAS -> CID
    struct TableIdentifier(HashMap<&'static str, &'static str>);
    impl IdentifierResolver for TableIdentifier {
        fn resolve_identifier(&self, registry_number: &str) -> Result<Option<String>, PipelineError> {
            Ok(self.0.get(registry_number).map(|s| s.to_string()))
        }
    }

    // Resolver de notación que registra las llamadas recibidas
    struct TableNotation {
        table: HashMap<&'static str, &'static str>,
        calls: Rc<RefCell<Vec<String>>>,
    }
    impl NotationResolver for TableNotation {
        fn resolve_notation(&self, cid: &str) -> Result<Option<String>, PipelineError> {
            self.calls.borrow_mut().push(cid.to_string());
            Ok(self.table.get(cid).map(|s| s.to_string()))
        }
    }

    // Gate con respuestas predefinidas ("" = aceptar default)
    struct ScriptedGate(Vec<&'static str>);
    impl NotationGate for ScriptedGate {
        fn confirm_or_override(&mut self, resolved: Option<&str>) -> Result<String, PipelineError> {
            let answer = if self.0.is_empty() { "" } else { self.0.remove(0) };
            Ok(if answer.is_empty() { resolved.unwrap_or("").to_string() } else { answer.to_string() })
        }
    }

    // Conversor que antepone el centinela y registra cada notación
    struct PrefixConverter(Rc<RefCell<Vec<String>>>);
    impl StructureConverter for PrefixConverter {
        fn convert(&self, notation: &str) -> Result<StructureEncoding, PipelineError> {
            self.0.borrow_mut().push(notation.to_string());
            Ok(StructureEncoding::from(format!("Vmp:{notation}").as_str()))
        }
    }

    struct FailingConverter;
    impl StructureConverter for FailingConverter {
        fn convert(&self, _notation: &str) -> Result<StructureEncoding, PipelineError> {
            Err(PipelineError::ConverterProcess("exit status 1".into()))
        }
    }

    fn records() -> Vec<CompoundRecord> {
        vec![CompoundRecord::new(1, "64-17-5", "Ethanol"),
             CompoundRecord::new(2, "", "Sin CAS"),
             CompoundRecord::new(3, "7732-18-5", "Water").with_encoding("VmpDRDAx"),]
    }

    fn build(store: InMemoryCompoundStore,
             gate: ScriptedGate,
             options: PipelineOptions)
             -> (EnrichmentPipeline<InMemoryCompoundStore>, Rc<RefCell<Vec<String>>>, Rc<RefCell<Vec<String>>>) {
        let notation_calls = Rc::new(RefCell::new(Vec::new()));
        let converted = Rc::new(RefCell::new(Vec::new()));
        let pipeline = EnrichmentPipeline::builder(store)
            .identifier_resolver(TableIdentifier(HashMap::from([("64-17-5", "702")])))
            .notation_resolver(TableNotation { table: HashMap::from([("702", "CCO")]),
                                               calls: notation_calls.clone() })
            .gate(gate)
            .converter(PrefixConverter(converted.clone()))
            .options(options)
            .build()
            .expect("pipeline completo");
        (pipeline, notation_calls, converted)
    }

    #[test]
    fn persists_resolved_and_skips_empty_notation() {
        let (mut p, notation_calls, converted) =
            build(InMemoryCompoundStore::new(records()), ScriptedGate(vec![]), PipelineOptions::default());
        let summary = p.run().expect("run ok");

        assert_eq!(summary.selected, 2, "el registro enriquecido no se selecciona");
        assert_eq!(summary.persisted, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.write_failures.is_empty());
        // Sin CID no se consulta la notación
        assert_eq!(*notation_calls.borrow(), vec!["702".to_string()]);
        // Con política Skip el conversor no recibe notaciones vacías
        assert_eq!(*converted.borrow(), vec!["CCO".to_string()]);
        assert_eq!(p.store().writes, vec![(CompoundId(1), StructureEncoding::from("Vmp:CCO"))]);
    }

    #[test]
    fn operator_override_replaces_resolved_notation() {
        let (mut p, _, converted) = build(InMemoryCompoundStore::new(records()),
                                          ScriptedGate(vec!["OCC", "C"]),
                                          PipelineOptions::default());
        let summary = p.run().unwrap();
        assert_eq!(summary.persisted, 2);
        assert_eq!(*converted.borrow(), vec!["OCC".to_string(), "C".to_string()]);
        let events = p.events();
        assert!(events.iter().any(|e| matches!(&e.kind,
                PipelineEventKind::OverrideApplied { notation, overridden: true } if notation == "OCC")));
    }

    #[test]
    fn convert_policy_invokes_converter_with_empty_notation() {
        let options = PipelineOptions { empty_notation: EmptyNotationPolicy::Convert,
                                        ..Default::default() };
        let (mut p, _, converted) = build(InMemoryCompoundStore::new(records()), ScriptedGate(vec![]), options);
        let summary = p.run().unwrap();
        assert_eq!(summary.persisted, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(*converted.borrow(), vec!["CCO".to_string(), String::new()]);
    }

    #[test]
    fn write_failure_continues_by_default() {
        let store = InMemoryCompoundStore::new(records()).with_failing_write(CompoundId(1));
        let (mut p, _, _) = build(store, ScriptedGate(vec!["", "C"]), PipelineOptions::default());
        let summary = p.run().expect("la corrida continúa");
        assert_eq!(summary.write_failures.len(), 1);
        assert_eq!(summary.write_failures[0].compound_id, CompoundId(1));
        assert_eq!(summary.persisted, 1, "el registro 2 se procesa igual");
        assert!(p.events().iter().any(|e| matches!(e.kind, PipelineEventKind::WriteFailed { .. })));
    }

    #[test]
    fn write_failure_aborts_with_abort_policy() {
        let store = InMemoryCompoundStore::new(records()).with_failing_write(CompoundId(1));
        let options = PipelineOptions { write_failure: WriteFailurePolicy::Abort,
                                        ..Default::default() };
        let (mut p, _, converted) = build(store, ScriptedGate(vec!["", "C"]), options);
        let err = p.run().unwrap_err();
        assert!(matches!(err, PipelineError::StoreWrite { .. }));
        assert_eq!(converted.borrow().len(), 1, "no se procesan más registros");
        assert!(matches!(p.events().last().map(|e| &e.kind), Some(PipelineEventKind::Aborted { .. })));
    }

    #[test]
    fn converter_failure_is_fatal() {
        let p = EnrichmentPipeline::builder(InMemoryCompoundStore::new(records()))
            .identifier_resolver(TableIdentifier(HashMap::from([("64-17-5", "702")])))
            .notation_resolver(TableNotation { table: HashMap::from([("702", "CCO")]),
                                               calls: Rc::new(RefCell::new(Vec::new())) })
            .gate(ScriptedGate(vec![]))
            .converter(FailingConverter)
            .build();
        let mut p = p.expect("builder");
        assert!(matches!(p.run(), Err(PipelineError::ConverterProcess(_))));
        assert!(p.store().writes.is_empty());
    }

    #[test]
    fn limit_truncates_selection() {
        let options = PipelineOptions { limit: Some(1),
                                        ..Default::default() };
        let (mut p, _, _) = build(InMemoryCompoundStore::new(records()), ScriptedGate(vec![]), options);
        let summary = p.run().unwrap();
        assert_eq!(summary.selected, 1);
        assert_eq!(summary.persisted, 1);
    }

    #[test]
    fn builder_requires_all_capabilities() {
        let res = EnrichmentPipeline::builder(InMemoryCompoundStore::default()).gate(ScriptedGate(vec![]))
                                                                                .build();
        match res {
            Err(PipelineError::Internal(msg)) => assert!(msg.contains("identifier resolver")),
            _ => panic!("builder incompleto debe fallar"),
        }
    }

    #[test]
    fn events_follow_stage_order() {
        let (mut p, _, _) = build(InMemoryCompoundStore::new(vec![CompoundRecord::new(1, "64-17-5", "Ethanol")]),
                                  ScriptedGate(vec![]),
                                  PipelineOptions::default());
        p.run().unwrap();
        let names: Vec<&str> = p.events().iter().map(|e| e.kind.variant_name()).collect();
        assert_eq!(names,
                   vec!["RunStarted",
                        "RecordStarted",
                        "IdentifierResolved",
                        "NotationResolved",
                        "OverrideApplied",
                        "Converted",
                        "Persisted",
                        "RunCompleted"]);
    }
}

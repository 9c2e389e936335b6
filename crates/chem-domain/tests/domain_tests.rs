use chem_domain::{CompoundRecord, RecordStage, RegistryNumber, ResolutionContext, StructureEncoding};

#[test]
fn test_record_equality_ignores_nothing() {
    // Dos registros con mismos campos deben ser iguales; cualquier diferencia
    // en la codificación los distingue.
    let a = CompoundRecord::new(10, "64-17-5", "Ethanol");
    let b = CompoundRecord::new(10, "64-17-5", "Ethanol");
    assert_eq!(a, b);
    assert_ne!(a, b.with_encoding("VmpDRDAx"));
}

#[test]
fn test_record_serializes_with_transparent_id() {
    let r = CompoundRecord::new(42, "7732-18-5", "Water");
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["compound_id"], serde_json::json!(42));
    assert_eq!(v["structure_encoding"], serde_json::Value::Null);
}

#[test]
fn test_context_skip_path_from_absent_identifier() {
    let mut ctx = ResolutionContext::new(CompoundRecord::new(3, "", "Unknown"));
    assert!(RegistryNumber::parse(ctx.registry_number()).is_none());
    ctx.identifier_resolved(None).unwrap();
    ctx.notation_resolved(None).unwrap();
    ctx.override_applied(String::new()).unwrap();
    ctx.skipped().unwrap();
    assert_eq!(ctx.stage(), RecordStage::Skipped);
    assert!(ctx.structure_encoding().is_none());
}

#[test]
fn test_cannot_skip_after_conversion() {
    let mut ctx = ResolutionContext::new(CompoundRecord::new(3, "64-17-5", "Ethanol"));
    ctx.identifier_resolved(Some("702".into())).unwrap();
    ctx.notation_resolved(Some("CCO".into())).unwrap();
    ctx.override_applied("CCO".into()).unwrap();
    ctx.converted(StructureEncoding::from("VmpD")).unwrap();
    assert!(ctx.skipped().is_err());
    assert_eq!(ctx.stage(), RecordStage::Converted);
}

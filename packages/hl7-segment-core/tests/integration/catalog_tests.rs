//! Field-table loading into a catalog.

use ntest::timeout;
use tempfile::tempdir;

use hl7_segment_core::definition::{MaxReps, TypeArg};
use hl7_segment_core::schema::{SchemaFile, SegmentSchema};
use hl7_segment_core::{DefinitionError, SegmentCatalog};

use crate::helpers::{fixture_catalog, fixture_path, fixture_registry, Hl7Value};

#[timeout(1000)]
#[test]
fn test_fixture_loads_every_segment() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.segment_names(), vec!["NK1", "OBR", "PID", "PV2"]);

    let pid = catalog.definition("PID").unwrap();
    assert_eq!(pid.len(), 39);
    assert_eq!(catalog.definition("NK1").unwrap().len(), 39);
    assert_eq!(catalog.definition("OBR").unwrap().len(), 50);
    assert_eq!(catalog.definition("PV2").unwrap().len(), 49);

    // Every generated field receives the message context first.
    for name in catalog.segment_names() {
        let definition = catalog.definition(&name).unwrap();
        assert!(definition
            .fields()
            .iter()
            .all(|f| f.type_args.first() == Some(&TypeArg::Message)));
    }
    let required: Vec<usize> = pid.required_fields().map(|f| f.position()).collect();
    assert_eq!(required, vec![1, 3, 5]);

    let production_class = pid.field(37).unwrap();
    assert_eq!(production_class.name, "Production Class Code");
    assert_eq!(production_class.max_reps, MaxReps::Bounded(2));

    let reliability = pid.field(31).unwrap();
    assert_eq!(reliability.table_number, Some(445));
    assert_eq!(
        reliability.type_args,
        vec![TypeArg::Message, TypeArg::Table(445)]
    );
    assert_eq!(reliability.max_reps, MaxReps::Unbounded);
}

#[timeout(1000)]
#[test]
fn test_table_zero_means_no_table() {
    let catalog = fixture_catalog();
    let nk1 = catalog.definition("NK1").unwrap();
    let sex = nk1.field(14).unwrap();
    assert_eq!(sex.name, "Administrative Sex");
    assert_eq!(sex.table_number, None);
    assert_eq!(sex.type_args, vec![TypeArg::Message, TypeArg::Table(0)]);

    let mut segment = catalog.create_segment("NK1").unwrap();
    let value = segment.get_field(14, 0).unwrap();
    assert_eq!(value.type_id, "IS");
    assert_eq!(value.table, None);

    let coded: Vec<u32> = catalog
        .definition("OBR")
        .unwrap()
        .coded_fields()
        .filter_map(|f| f.table_number)
        .collect();
    assert_eq!(coded, vec![65, 74, 123, 507]);
}

#[timeout(1000)]
#[test]
fn test_schema_save_and_reload() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("segments.json");

    let catalog = fixture_catalog();
    let mut schema = SchemaFile::new();
    for name in catalog.segment_names() {
        let definition = catalog.definition(&name).unwrap();
        schema.segments.push(SegmentSchema::from_definition(&definition));
    }
    schema.save(&path).unwrap();

    let reloaded = SchemaFile::load(&path).unwrap();
    let other = SegmentCatalog::<Hl7Value>::new();
    assert_eq!(other.load_schema(&reloaded, &fixture_registry()).unwrap(), 4);

    for name in catalog.segment_names() {
        assert_eq!(
            other.definition(&name).unwrap().fields(),
            catalog.definition(&name).unwrap().fields()
        );
    }
}

#[timeout(1000)]
#[test]
fn test_missing_file_and_unknown_type_are_errors() {
    let temp_dir = tempdir().unwrap();
    assert!(matches!(
        SchemaFile::load(temp_dir.path().join("missing.json")),
        Err(DefinitionError::Io(_))
    ));

    let schema = SchemaFile::load(fixture_path()).unwrap();
    let registry = fixture_registry();
    registry.remove("NULLDT");

    let catalog = SegmentCatalog::new();
    let err = catalog.load_schema(&schema, &registry).unwrap_err();
    assert!(matches!(
        err,
        DefinitionError::UnknownType { ref segment, position: 4, .. } if segment == "PID"
    ));
    assert!(catalog.is_empty());
}

#[timeout(1000)]
#[test]
fn test_reloading_same_schema_is_rejected() {
    let schema = SchemaFile::load(fixture_path()).unwrap();
    let catalog = fixture_catalog();
    assert!(matches!(
        catalog.load_schema(&schema, &fixture_registry()),
        Err(DefinitionError::SegmentAlreadyRegistered(_))
    ));
    assert_eq!(catalog.len(), 4);
}

#[test]
fn test_inline_schema_drives_segment() -> anyhow::Result<()> {
    let schema = SchemaFile::from_json_str(
        r#"{
            "version": 1,
            "segments": [{
                "name": "ZPI",
                "fields": [
                    { "name": "Set ID", "type": "SI", "required": true },
                    { "name": "Alias", "type": "XPN_ELR", "max_reps": -1 },
                    { "name": "Race", "type": "CWE", "table": 5, "max_reps": 3 }
                ]
            }]
        }"#,
    )?;

    let catalog = SegmentCatalog::new();
    catalog.load_schema(&schema, &fixture_registry())?;
    let mut zpi = catalog.create_segment("ZPI")?;

    zpi.get_field(1, 4)?.set(&["ALIAS"]);
    assert_eq!(zpi.get_reps(1)?, 5);
    assert_eq!(zpi.get_field(2, 2)?.table, Some(5));
    assert!(zpi.get_field(2, 3).is_err());
    assert_eq!(zpi.conformance().missing_required().count(), 1);
    Ok(())
}

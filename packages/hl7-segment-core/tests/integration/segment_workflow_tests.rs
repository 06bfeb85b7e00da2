//! Segment population workflows over the fixture field tables.

use std::thread;

use ntest::timeout;

use hl7_segment_core::{FieldRef, SegmentError};

use crate::helpers::fixture_catalog;

/// Populates a PID the way a decoder walks a `PID|...` line: field by field,
/// repetition by repetition, through the get-or-create accessor.
#[timeout(1000)]
#[test]
fn test_decode_style_population() {
    let catalog = fixture_catalog();
    let mut pid = catalog.create_segment("PID").unwrap();

    let decoded: &[(&str, &[&[&str]])] = &[
        ("PID-1", &[&["1"]]),
        ("PID-3", &[&["12345", "", "", "MRN"], &["999-99-9999", "", "", "SS"]]),
        ("PID-5", &[&["DOE", "JOHN"], &["DOE", "JOHNNY"]]),
        ("PID-8", &[&["M"]]),
        ("PID-10", &[&["2106-3", "White"]]),
    ];

    for (reference, reps) in decoded {
        let index = pid.resolve(&FieldRef::parse(reference).unwrap()).unwrap();
        for (rep, components) in reps.iter().enumerate() {
            pid.get_field(index, rep).unwrap().set(components);
        }
    }

    assert_eq!(pid.get_reps(2).unwrap(), 2);
    assert_eq!(pid.get_all(4).unwrap()[1].components, vec!["DOE", "JOHNNY"]);
    assert_eq!(pid.get(7, 0).unwrap().unwrap().table, Some(1));
    assert!(pid.conformance().is_conformant());

    let populated: Vec<usize> = pid.populated_fields().map(|(i, _)| i + 1).collect();
    assert_eq!(populated, vec![1, 3, 5, 8, 10]);
}

#[timeout(1000)]
#[test]
fn test_too_many_repetitions_flagged_during_decode() {
    let catalog = fixture_catalog();
    let mut pid = catalog.create_segment("PID").unwrap();

    // PID-38 allows two repetitions; a third is a schema mismatch.
    pid.get_field(37, 0).unwrap().set(&["BREEDING"]);
    pid.get_field(37, 1).unwrap().set(&["DAIRY"]);
    let err = pid.get_field(37, 2).unwrap_err();
    assert_eq!(
        err,
        SegmentError::CardinalityExceeded {
            segment: "PID".to_string(),
            field: 38,
            requested: 3,
            max: 2,
        }
    );
    assert_eq!(
        err.to_string(),
        "Cardinality exceeded for PID-38: 3 repetitions requested, at most 2 allowed"
    );
    assert_eq!(pid.get_reps(37).unwrap(), 2);
}

#[timeout(1000)]
#[test]
fn test_application_edits_names() {
    let catalog = fixture_catalog();
    let mut nk1 = catalog.create_segment("NK1").unwrap();

    nk1.get_field(0, 0).unwrap().set(&["1"]);
    nk1.insert_repetition(1, 0).unwrap().set(&["SMITH", "ANNA"]);
    nk1.insert_repetition(1, 1).unwrap().set(&["SMITH", "BOB"]);
    nk1.insert_repetition(1, 0).unwrap().set(&["JONES", "CARL"]);

    let names: Vec<Option<&str>> = nk1.get_all(1).unwrap().iter().map(|v| v.first()).collect();
    assert_eq!(names, vec![Some("JONES"), Some("SMITH"), Some("SMITH")]);

    let removed = nk1.remove_repetition(1, 1).unwrap();
    assert_eq!(removed.components, vec!["SMITH", "ANNA"]);
    assert_eq!(nk1.get_reps(1).unwrap(), 2);

    // Organization Name is non-repeating
    assert!(matches!(
        nk1.insert_repetition(12, 1),
        Err(SegmentError::InvalidRepetitionIndex { rep: 1, reps: 0, .. })
    ));
    nk1.insert_repetition(12, 0).unwrap().set(&["ACME"]);
    assert!(matches!(
        nk1.insert_repetition(12, 0),
        Err(SegmentError::CardinalityExceeded { field: 13, .. })
    ));
}

#[timeout(1000)]
#[test]
fn test_missing_required_fields_reported() {
    let catalog = fixture_catalog();
    let mut obr = catalog.create_segment("OBR").unwrap();
    obr.get_field(0, 0).unwrap().set(&["1"]);
    obr.get_field(3, 0).unwrap().set(&["94500-6", "SARS-CoV-2 RNA", "LN"]);

    let report = obr.conformance();
    assert_eq!(report.segment, "OBR");
    assert_eq!(
        report.missing_required().collect::<Vec<_>>(),
        vec!["OBR-3", "OBR-7", "OBR-22", "OBR-25"]
    );

    // Withdrawn fields (encoded as 0) repeat freely
    let mut pv2 = catalog.create_segment("PV2").unwrap();
    pv2.get_field(0, 9).unwrap();
    assert_eq!(pv2.get_reps(0).unwrap(), 10);
}

#[timeout(5000)]
#[test]
fn test_parsed_message_read_from_threads() {
    let catalog = fixture_catalog();
    let mut pid = catalog.create_segment("PID").unwrap();
    pid.get_field(0, 0).unwrap().set(&["1"]);
    for rep in 0..5 {
        pid.get_field(2, rep).unwrap().set(&[&format!("ID{rep}")]);
    }
    pid.get_field(4, 0).unwrap().set(&["DOE", "JANE"]);
    let frozen = pid.freeze();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let frozen = frozen.clone();
            thread::spawn(move || {
                let ids = frozen.get_all(2).unwrap();
                ids[worker].first().map(str::to_string)
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("ID{worker}")));
    }
    assert!(frozen.conformance().is_conformant());
}

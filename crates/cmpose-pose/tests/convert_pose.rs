use std::fs;

use cmpose_cmp::CmpDocument;
use cmpose_pose::bones::EXCLUDED_SUBSTRINGS;
use cmpose_pose::{
    convert, convert_file, ConvertOptions, Error, MalformedReason, PoseConverter, PoseDocument,
    RecordOutcome, SkipReason, UNIT_VECTOR, ZERO_VECTOR,
};
use pretty_assertions::assert_eq;

const WAIST: &str = "DB C4 32 3F F3 E6 9B BE 4B 8E 15 3F 05 4F 8F BE";

fn cmp(json: &str) -> CmpDocument {
    CmpDocument::parse(json).unwrap()
}

#[test]
fn test_waist_rotation() {
    let doc = convert(&cmp(&format!(r#"{{"Waist": "{WAIST}"}}"#)));
    assert_eq!(
        doc.bone("j_kosi").unwrap().rotation,
        "-0.69831628, 0.30449638, -0.58420247, 0.27989975"
    );
}

#[test]
fn test_reference_rotation() {
    // Raw components 0.79710668, -0.18765971, 0.5715487, -0.11197264
    let doc = convert(&cmp(
        r#"{"Waist": "2F 0F 4C 3F DE 29 40 BE 04 51 12 3F E9 51 E5 BD"}"#,
    ));
    assert_eq!(
        doc.bone("j_kosi").unwrap().rotation,
        "-0.79710668, 0.18765971, -0.5715487, 0.11197264"
    );
}

#[test]
fn test_identity_rotation_keeps_signed_zero() {
    let doc = convert(&cmp(
        r#"{"Neck": "00 00 00 00 00 00 00 00 00 00 00 00 00 00 80 3F"}"#,
    ));
    assert_eq!(doc.bone("j_kubi").unwrap().rotation, "-0.0, -0.0, -0.0, -1.0");
}

#[test]
fn test_full_document() {
    let doc = convert(&cmp(&format!(
        r#"{{"CMPVersion": "2", "Waist": "{WAIST}", "Head": null}}"#
    )));
    let expected = r#"{
    "FileExtension": ".pose",
    "TypeName": "Anamnesis Pose",
    "Position": "0, 0, 0",
    "Rotation": "0, 0, 0, 1",
    "Scale": "1, 1, 1",
    "Bones": {
        "j_kosi": {
            "Position": "0, 0, 0",
            "Rotation": "-0.69831628, 0.30449638, -0.58420247, 0.27989975",
            "Scale": "1, 1, 1"
        }
    },
    "Author": "CMP to POSE file converter"
}"#;
    assert_eq!(doc.to_json_string().unwrap(), expected);
}

#[test]
fn test_excluded_fields_never_become_bones() {
    for term in EXCLUDED_SUBSTRINGS {
        let json = format!(r#"{{"{term}": "{WAIST}", "Hand{term}": "{WAIST}"}}"#);
        let conversion = PoseConverter::default().convert(&cmp(&json)).unwrap();

        assert_eq!(conversion.document.bone_count(), 0, "{term}");
        assert!(conversion
            .report
            .records()
            .iter()
            .all(|r| matches!(r.outcome, RecordOutcome::Skipped(SkipReason::Excluded))));
    }
}

#[test]
fn test_unmapped_and_null_records() {
    let json = format!(
        r#"{{"Tail": "{WAIST}", "Neck": null, "Jaw": "null", "Waist": "{WAIST}"}}"#
    );
    let conversion = PoseConverter::default().convert(&cmp(&json)).unwrap();

    assert_eq!(conversion.document.bone_count(), 1);
    assert_eq!(conversion.report.converted(), 1);
    assert_eq!(conversion.report.skipped(), 3);
    assert!(conversion.report.is_clean());

    let reasons: Vec<_> = conversion
        .report
        .records()
        .iter()
        .filter_map(|r| match r.outcome {
            RecordOutcome::Skipped(reason) => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![SkipReason::Unmapped, SkipReason::NullOrMissing, SkipReason::NullOrMissing]
    );
}

#[test]
fn test_constant_position_and_scale() {
    let json = format!(
        r#"{{"Waist": "{WAIST}", "Neck": "{WAIST}", "HandLeft": "00 00 00 00 00 00 00 00 00 00 00 00 00 00 80 3F"}}"#
    );
    let doc = convert(&cmp(&json));

    assert_eq!(doc.bone_count(), 3);
    for transform in doc.bones().values() {
        assert_eq!(transform.position, ZERO_VECTOR);
        assert_eq!(transform.scale, UNIT_VECTOR);
        assert_eq!(transform.rotation.split(", ").count(), 4);
    }
}

#[test]
fn test_conversion_is_idempotent() {
    let json = format!(r#"{{"Waist": "{WAIST}", "Neck": "{WAIST}", "Race": "01"}}"#);
    let source = cmp(&json);

    let first = convert(&source).to_json_string().unwrap();
    let second = convert(&source).to_json_string().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_record_does_not_abort_batch() {
    // Neck has 30 digits
    let json = format!(
        r#"{{"Neck": "DB C4 32 3F F3 E6 9B BE 4B 8E 15 3F 05 4F 8F", "Waist": "{WAIST}"}}"#
    );
    let conversion = PoseConverter::default().convert(&cmp(&json)).unwrap();

    assert!(conversion.document.bone("j_kubi").is_none());
    assert!(conversion.document.bone("j_kosi").is_some());
    assert_eq!(conversion.report.failed(), 1);

    let failure = conversion.report.failures().next().unwrap();
    assert_eq!(failure.source_name(), "Neck");
    assert!(matches!(failure.reason(), MalformedReason::Decode(_)));
}

#[test]
fn test_empty_and_non_string_values_are_malformed() {
    let json = r#"{"Neck": "", "Waist": 12}"#;
    let conversion = PoseConverter::default().convert(&cmp(json)).unwrap();

    assert_eq!(conversion.document.bone_count(), 0);
    assert_eq!(conversion.report.failed(), 2);
}

#[test]
fn test_strict_mode_fails_on_malformed_record() {
    let json = format!(r#"{{"Waist": "{WAIST}", "Neck": "DB C4"}}"#);
    let converter = PoseConverter::new(ConvertOptions::default().with_strict(true));

    let err = converter.convert(&cmp(&json)).unwrap_err();
    match err {
        Error::MalformedRecord(failure) => assert_eq!(failure.source_name(), "Neck"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_later_source_wins_shared_target() {
    let identity = "00 00 00 00 00 00 00 00 00 00 00 00 00 00 80 3F";

    let doc = convert(&cmp(&format!(
        r#"{{"Head": "{WAIST}", "RootHead": "{identity}"}}"#
    )));
    assert_eq!(doc.bone("j_kao").unwrap().rotation, "-0.0, -0.0, -0.0, -1.0");

    let doc = convert(&cmp(&format!(
        r#"{{"RootHead": "{identity}", "Head": "{WAIST}"}}"#
    )));
    assert_eq!(
        doc.bone("j_kao").unwrap().rotation,
        "-0.69831628, 0.30449638, -0.58420247, 0.27989975"
    );
}

#[test]
fn test_bones_keep_source_order() {
    let json = format!(r#"{{"Neck": "{WAIST}", "Waist": "{WAIST}", "Jaw": "{WAIST}"}}"#);
    let doc = convert(&cmp(&json));

    let names: Vec<_> = doc.bones().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["j_kubi", "j_kosi", "j_ago"]);
}

#[test]
fn test_custom_author() {
    let converter = PoseConverter::new(ConvertOptions::default().with_author("Tester"));
    let conversion = converter.convert(&CmpDocument::default()).unwrap();
    assert_eq!(conversion.document.author(), "Tester");
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pose.cmp");
    let output = dir.path().join("pose.pose");
    fs::write(&input, format!(r#"{{"Waist": "{WAIST}", "Neck": "bad"}}"#)).unwrap();

    let report = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(report.converted(), 1);
    assert_eq!(report.failed(), 1);

    let written = PoseDocument::from_pose(&output).unwrap();
    assert_eq!(written.bone_count(), 1);
    assert!(fs::read_to_string(&output).unwrap().starts_with("{\n    \"FileExtension\""));
}

#[test]
fn test_convert_file_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(
        dir.path().join("missing.cmp"),
        dir.path().join("out.pose"),
        &ConvertOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Cmp(cmpose_cmp::Error::Io(_))));
    assert!(!dir.path().join("out.pose").exists());
}

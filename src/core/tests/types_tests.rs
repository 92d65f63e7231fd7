use crate::core::types::{Note, NoteError, NoteRecord};

/// Helper to build a record from key/value pairs
fn record(pairs: &[(&str, &str)]) -> NoteRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_record_roundtrip_keeps_extra_keys() {
    let original = record(&[
        ("id", "12"),
        ("title", "Trip"),
        ("content", "pack socks"),
        ("created_at", "2025-10-15T14:30:25+02:00"),
        ("updated_at", "2025-10-16T09:00:00+02:00"),
        ("color", "amber"),
    ]);

    let note = Note::from_record(&original).unwrap();
    assert_eq!(note.id, 12);
    assert_eq!(note.extra.get("color").map(String::as_str), Some("amber"));

    // Back to a record: nothing lost, nothing added
    assert_eq!(note.to_record(), original);
}

#[test]
fn test_record_missing_text_fields_default_to_empty() {
    let note = Note::from_record(&record(&[("id", "5")])).unwrap();
    assert_eq!(note.title, "");
    assert_eq!(note.content, "");
    assert_eq!(note.created_at, "");
    assert!(note.extra.is_empty());
}

#[test]
fn test_record_without_id_is_rejected() {
    let result = Note::from_record(&record(&[("title", "orphan")]));
    assert_eq!(result, Err(NoteError::MissingId));
}

#[test]
fn test_record_with_non_numeric_id_is_rejected() {
    let result = Note::from_record(&record(&[("id", "abc")]));
    assert_eq!(result, Err(NoteError::InvalidId("abc".to_string())));
}

#[test]
fn test_record_id_tolerates_whitespace() {
    let note = Note::from_record(&record(&[("id", " 9 ")])).unwrap();
    assert_eq!(note.id, 9);
}

#[test]
fn test_preview_skips_blank_lines() {
    let note = Note::new(1, "t", "\n   \n  first line  \nsecond", "");
    assert_eq!(note.preview(), "first line");
}

#[test]
fn test_note_serialises_to_flat_json_object() {
    let note = Note::new(3, "Title", "Body", "2025-01-01T00:00:00+00:00");
    let json = serde_json::to_string(&note.to_record()).unwrap();

    assert!(json.contains(r#""id":"3""#), "id must be a string value: {}", json);
    assert!(json.contains(r#""title":"Title""#));
    assert!(json.contains(r#""content":"Body""#));
}

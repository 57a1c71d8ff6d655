//! Integration tests for template loading.

use serde_json::json;
use tabmap_model::{ModelError, Template, TemplateSource};

#[test]
fn loads_json_template() {
    let raw = r#"{
        "columns": [
            { "name": "First Name", "required": true, "suggested_mappings": ["fname", "given"] },
            { "name": "Email", "key": "email", "description": "Work address" },
            { "name": "Tags", "key": "tags", "multiple": true, "combiner": "comma" }
        ]
    }"#;
    let template = Template::from_json_str(raw).expect("valid template");

    assert_eq!(template.len(), 3);
    let first = &template.columns()[0];
    assert_eq!(first.key, "first_name");
    assert!(first.required);
    assert_eq!(first.suggested_mappings, vec!["fname", "given"]);
    assert_eq!(
        template.column("email").and_then(|c| c.description.as_deref()),
        Some("Work address")
    );
    assert!(template.is_multiple("tags"));
    assert!(!template.is_multiple("email"));
    assert_eq!(template.combiners().get("tags").map(|c| c.name()), Some("comma"));
    assert!(template.combiners().get("email").is_none());
}

#[test]
fn key_only_column_takes_key_as_name() {
    let template = Template::from_json_value(&json!({
        "columns": [{ "key": "email", "required": true }]
    }))
    .expect("valid template");
    let column = &template.columns()[0];
    assert_eq!(column.name, "email");
    assert!(column.required);
}

#[test]
fn rejects_malformed_json() {
    let err = Template::from_json_str("{ columns: ").unwrap_err();
    assert!(matches!(err, ModelError::InvalidJson(_)));
}

#[test]
fn rejects_structural_problems() {
    assert_eq!(
        Template::from_json_value(&json!({})).unwrap_err(),
        ModelError::TemplateRequired
    );
    assert_eq!(
        Template::from_json_value(&json!({ "title": "x" })).unwrap_err(),
        ModelError::NoColumns
    );
    assert_eq!(
        Template::from_json_value(&json!({ "columns": "email" })).unwrap_err(),
        ModelError::ColumnsNotArray
    );
    assert_eq!(
        Template::from_json_value(&json!({ "columns": [] })).unwrap_err(),
        ModelError::NoColumns
    );
    assert_eq!(
        Template::from_json_value(&json!({ "columns": [42] })).unwrap_err(),
        ModelError::ColumnNotObject { index: 0 }
    );
    assert_eq!(
        Template::from_json_value(&json!({ "columns": [{ "name": "A" }, { "description": "x" }] }))
            .unwrap_err(),
        ModelError::MissingName { index: 1 }
    );
}

#[test]
fn rejects_duplicate_derived_keys() {
    let err = Template::from_json_value(&json!({
        "columns": [{ "name": "Email" }, { "name": "email" }]
    }))
    .unwrap_err();
    assert_eq!(err, ModelError::DuplicateKey("email".to_string()));
}

#[test]
fn rejects_unknown_combiner() {
    let err = Template::from_json_value(&json!({
        "columns": [{ "key": "name", "combiner": "concat" }]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownCombiner {
            key: "name".to_string(),
            name: "concat".to_string()
        }
    );
}

#[test]
fn template_source_variants_resolve() {
    let from_str = TemplateSource::from(r#"{"columns":[{"key":"a"}]}"#)
        .into_template()
        .expect("json string");
    assert_eq!(from_str.columns()[0].key, "a");

    let from_value = TemplateSource::from(json!({"columns":[{"key":"b"}]}))
        .into_template()
        .expect("json value");
    assert_eq!(from_value.columns()[0].key, "b");

    let nested = TemplateSource::from(json!(r#"{"columns":[{"key":"c"}]}"#))
        .into_template()
        .expect("string value");
    assert_eq!(nested.columns()[0].key, "c");

    let empty = TemplateSource::from("  ").into_template().unwrap_err();
    assert_eq!(empty, ModelError::TemplateRequired);
}

//! Purpose: Exercise parameter templating end to end with catalog-shaped data.
//! Exports: Integration tests only (no runtime exports).
//! Role: Cover directive kinds (substitution, blocks, conditionals) together
//! with unused-context tracking and error surfacing.
//! Invariants: Error cases assert kind and offending key, not message text.

use curio::error::ErrorKind;
use curio::template::expand_templates;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

fn params(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn context(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn catalog_entry_arguments_render_against_session_context() {
    let templates = params(&[
        ("urlpath", "s3://{{ bucket }}/{{ prefix }}/data.parquet"),
        (
            "storage_options",
            "{{#if anonymous}}anon{{else}}profile={{ profile }}{{/if}}",
        ),
        (
            "partitions",
            "{{#each years}}year={{this}} {{/each}}",
        ),
        ("filter", "{{ filter }}"),
    ]);
    let ctx = context(json!({
        "bucket": "catalog-data",
        "prefix": "v2/trips",
        "anonymous": false,
        "profile": "research",
        "years": [2023, 2024],
        "filter": "kind=\"taxi\"&passengers>1",
        "cache_dir": "/tmp/cache",
    }));

    let out = expand_templates(&templates, &ctx).unwrap();

    assert_eq!(out.params["urlpath"], "s3://catalog-data/v2/trips/data.parquet");
    assert_eq!(out.params["storage_options"], "profile=research");
    assert_eq!(out.params["partitions"], "year=2023 year=2024 ");
    // Query-string characters pass through untouched, no entity escaping.
    assert_eq!(out.params["filter"], "kind=\"taxi\"&passengers>1");
    assert_eq!(
        out.unused_context.into_iter().collect::<Vec<_>>(),
        vec!["cache_dir".to_string()]
    );
}

#[test]
fn rendered_output_keeps_the_input_keys() {
    let templates = params(&[("a", "1"), ("b", "{{ x }}"), ("c", "static")]);
    let ctx = context(json!({"x": "2"}));

    let out = expand_templates(&templates, &ctx).unwrap();

    let keys: Vec<_> = out.params.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(out.params["a"], "1");
    assert_eq!(out.params["c"], "static");
}

#[test]
fn one_malformed_template_fails_the_whole_expansion() {
    let templates = params(&[
        ("good", "{{ x }}"),
        ("broken", "{{#each xs}}never closed"),
    ]);
    let ctx = context(json!({"x": 1, "xs": []}));

    let err = expand_templates(&templates, &ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
    assert_eq!(err.key(), Some("broken"));
}

#[test]
fn result_serializes_for_catalog_metadata_payloads() {
    let out = expand_templates(
        &params(&[("x", "{{ y }}")]),
        &context(json!({"y": "hello", "z": "unused"})),
    )
    .unwrap();

    let payload = serde_json::to_value(&out).unwrap();
    assert_eq!(
        payload,
        json!({
            "params": {"x": "hello"},
            "unused_context": ["z"],
        })
    );
}

//! Tag propagation integration tests.
//!
//! Covers closure computation (cycle safety, root exclusion, source
//! seeding) and the never-abort bulk application contract.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tamscope::catalog::{CatalogReader, Page, TagWriter};
use tamscope::models::EntityKind;
use tamscope::services::{
    PropagationClosure, TagAction, closure_for_flow, closure_for_source, propagate_tag,
};
use tamscope::{Error, Flow};

/// In-memory flow store with a request log.
#[derive(Default)]
struct MockFlows {
    flows: BTreeMap<String, Value>,
    log: Mutex<Vec<String>>,
}

impl MockFlows {
    fn with_flow(mut self, record: Value) -> Self {
        let id = record["id"].as_str().expect("flow id").to_string();
        self.flows.insert(id, record);
        self
    }

    fn fetch_count(&self, flow_id: &str) -> usize {
        let prefix = format!("flows/{flow_id}?");
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|path| path.starts_with(&prefix))
            .count()
    }
}

#[async_trait]
impl CatalogReader for MockFlows {
    async fn get(&self, path: &str) -> Result<Page, Error> {
        self.log.lock().unwrap().push(path.to_string());
        let (route, query) = path.split_once('?').unwrap_or((path, ""));

        if route == "flows" {
            let source_id = query
                .split('&')
                .find_map(|p| p.strip_prefix("source_id="))
                .unwrap_or_default();
            let owned: Vec<Value> = self
                .flows
                .values()
                .filter(|f| f["source_id"] == source_id)
                .cloned()
                .collect();
            return Ok(Page::last(Value::Array(owned)));
        }

        if let Some(flow_id) = route.strip_prefix("flows/") {
            if let Some(record) = self.flows.get(flow_id) {
                return Ok(Page::last(record.clone()));
            }
        }

        Err(Error::Request {
            path: path.to_string(),
            cause: "404 not found".to_string(),
        })
    }
}

/// Records every mutation; fails the ids it was told to fail.
#[derive(Default)]
struct MockTagWriter {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockTagWriter {
    fn failing_on(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    fn record(&self, verb: &str, kind: EntityKind, id: &str, name: &str) -> Result<(), Error> {
        self.calls.lock().unwrap().push(format!("{verb} {kind}/{id} {name}"));
        if self.failing.iter().any(|f| f == id) {
            return Err(Error::Request {
                path: format!("{kind}/{id}/tags/{name}"),
                cause: "500 internal server error".to_string(),
            });
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }
}

#[async_trait]
impl TagWriter for MockTagWriter {
    async fn put_tag(
        &self,
        kind: EntityKind,
        id: &str,
        name: &str,
        _value: &str,
    ) -> Result<(), Error> {
        self.record("PUT", kind, id, name)
    }

    async fn delete_tag(&self, kind: EntityKind, id: &str, name: &str) -> Result<(), Error> {
        self.record("DELETE", kind, id, name)
    }
}

fn flow_record(id: &str, source_id: &str, children: &[&str]) -> Value {
    let refs: Vec<Value> = children.iter().map(|c| json!({"id": c})).collect();
    json!({"id": id, "source_id": source_id, "flow_collection": refs})
}

fn decode_flow(record: Value) -> Flow {
    serde_json::from_value(record).unwrap()
}

fn ids(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

// =========================================================================
// closures
// =========================================================================

#[tokio::test]
async fn flow_closure_collects_descendants_but_never_the_root() {
    let store = MockFlows::default()
        .with_flow(flow_record("c1", "s2", &["c3"]))
        .with_flow(flow_record("c2", "s3", &[]))
        .with_flow(flow_record("c3", "s2", &[]));

    let root = decode_flow(flow_record("root", "s1", &["c1", "c2"]));
    let closure = closure_for_flow(&store, &root).await.unwrap();

    assert_eq!(ids(&closure.flow_ids), ["c1", "c2", "c3"]);
    assert_eq!(ids(&closure.source_ids), ["s1", "s2", "s3"]);
    assert!(!closure.flow_ids.contains("root"));
}

#[tokio::test]
async fn flow_closure_terminates_on_a_back_reference_to_an_ancestor() {
    // c1 references the root; the root must be neither re-fetched nor
    // reported.
    let store = MockFlows::default().with_flow(flow_record("c1", "s2", &["root", "c1"]));

    let root = decode_flow(flow_record("root", "s1", &["c1"]));
    let closure = closure_for_flow(&store, &root).await.unwrap();

    assert_eq!(ids(&closure.flow_ids), ["c1"]);
    assert_eq!(store.fetch_count("root"), 0);
    assert_eq!(store.fetch_count("c1"), 1);
}

#[tokio::test]
async fn flow_closure_without_a_source_id_seeds_nothing() {
    let store = MockFlows::default();
    let root: Flow = serde_json::from_value(json!({"id": "root", "source_id": null})).unwrap();

    let closure = closure_for_flow(&store, &root).await.unwrap();
    assert!(closure.flow_ids.is_empty());
    assert!(closure.source_ids.is_empty());
}

#[tokio::test]
async fn source_closure_includes_owned_flows_and_their_descendants() {
    let store = MockFlows::default()
        .with_flow(flow_record("f1", "s1", &["c1"]))
        .with_flow(flow_record("f2", "s1", &[]))
        .with_flow(flow_record("c1", "s9", &[]));

    let closure = closure_for_source(&store, "s1").await.unwrap();

    assert_eq!(ids(&closure.flow_ids), ["c1", "f1", "f2"]);
    assert_eq!(ids(&closure.source_ids), ["s1", "s9"]);
    // Owned flows came from the listing; only the descendant needed a fetch.
    assert_eq!(store.fetch_count("f1"), 0);
    assert_eq!(store.fetch_count("f2"), 0);
    assert_eq!(store.fetch_count("c1"), 1);
}

#[tokio::test]
async fn closure_fetch_errors_surface() {
    let store = MockFlows::default();
    let root = decode_flow(flow_record("root", "s1", &["missing"]));

    let err = closure_for_flow(&store, &root).await.unwrap_err();
    assert!(matches!(err, Error::Request { .. }));
}

// =========================================================================
// bulk application
// =========================================================================

fn closure_of(flows: &[&str], sources: &[&str]) -> PropagationClosure {
    PropagationClosure {
        flow_ids: flows.iter().map(ToString::to_string).collect(),
        source_ids: sources.iter().map(ToString::to_string).collect(),
    }
}

#[tokio::test]
async fn propagate_tag_updates_every_id_in_both_groups() {
    let writer = Arc::new(MockTagWriter::default());
    let closure = closure_of(&["f1", "f2"], &["s1"]);
    let action = TagAction::Update {
        name: "rating".to_string(),
        value: "pg".to_string(),
    };

    let report = propagate_tag(Arc::clone(&writer) as Arc<dyn TagWriter>, &closure, &action).await;

    assert!(report.is_clean());
    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded(), 3);
    assert_eq!(
        writer.calls(),
        ["PUT flows/f1 rating", "PUT flows/f2 rating", "PUT sources/s1 rating"]
    );
}

#[tokio::test]
async fn propagate_tag_keeps_going_past_failures() {
    let writer = Arc::new(MockTagWriter::failing_on(&["f1", "s1"]));
    let closure = closure_of(&["f1", "f2"], &["s1", "s2"]);
    let action = TagAction::Delete {
        name: "rating".to_string(),
    };

    let report = propagate_tag(Arc::clone(&writer) as Arc<dyn TagWriter>, &closure, &action).await;

    // Every id was attempted despite two failures.
    assert_eq!(writer.calls().len(), 4);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.succeeded(), 2);

    let mut failed: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("{}/{}", f.kind, f.id))
        .collect();
    failed.sort_unstable();
    assert_eq!(failed, ["flows/f1", "sources/s1"]);
    assert!(report.failures.iter().all(|f| matches!(f.error, Error::Request { .. })));
}

#[tokio::test]
async fn propagate_tag_on_an_empty_closure_is_a_no_op() {
    let writer = Arc::new(MockTagWriter::default());
    let report = propagate_tag(
        Arc::clone(&writer) as Arc<dyn TagWriter>,
        &PropagationClosure::default(),
        &TagAction::Delete {
            name: "rating".to_string(),
        },
    )
    .await;

    assert!(report.is_clean());
    assert_eq!(report.attempted, 0);
    assert!(writer.calls().is_empty());
}

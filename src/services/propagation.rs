//! Tag propagation closures and bulk application.
//!
//! A tag edit on one entity fans out to the entities that inherit it: a
//! flow's collected descendants and all of their sources, or every flow a
//! source owns plus their descendants. The closure walk is exact and
//! cycle-safe; the bulk application deliberately never aborts. The primary
//! edit has already succeeded by the time propagation runs, so per-id
//! failures are reported, not raised.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::catalog::{CatalogReader, TagWriter};
use crate::models::{EntityKind, Flow};
use crate::{Error, Result};

/// The id sets that must receive a propagated tag mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationClosure {
    /// Flows to mutate. Never contains the directly-edited flow itself.
    pub flow_ids: BTreeSet<String>,
    /// Sources to mutate.
    pub source_ids: BTreeSet<String>,
}

/// One bulk tag mutation, applied uniformly to a closure.
#[derive(Debug, Clone)]
pub enum TagAction {
    /// Create or update the tag on every entity.
    Update {
        /// Tag name.
        name: String,
        /// Tag value.
        value: String,
    },
    /// Delete the tag from every entity.
    Delete {
        /// Tag name.
        name: String,
    },
}

/// One id whose mutation request failed.
#[derive(Debug)]
pub struct PropagationFailure {
    /// Which collection the entity lives in.
    pub kind: EntityKind,
    /// The entity id.
    pub id: String,
    /// What went wrong.
    pub error: Error,
}

/// Outcome of one bulk propagation: inspectable, never fatal.
#[derive(Debug, Default)]
pub struct PropagationReport {
    /// How many mutation requests were issued.
    pub attempted: usize,
    /// The requests that failed.
    pub failures: Vec<PropagationFailure>,
}

impl PropagationReport {
    /// How many mutation requests succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Whether every mutation request succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Computes the propagation closure of a flow.
///
/// `source_ids` is seeded with the flow's own `source_id`; `flow_ids`
/// collects every transitive `flow_collection` descendant. The flow itself
/// is excluded, since the caller has already applied the edit to it
/// directly, and its id is pre-marked visited, so a descendant's
/// back-reference to it
/// is neither re-fetched nor reported. Each descendant id is marked
/// *before* its record is fetched, which terminates cycles.
///
/// # Errors
///
/// Fetch errors surface unchanged; only the later bulk application swallows
/// failures.
pub async fn closure_for_flow<R: CatalogReader + ?Sized>(
    reader: &R,
    flow: &Flow,
) -> Result<PropagationClosure> {
    let mut closure = PropagationClosure::default();
    closure.source_ids.extend(flow.source_id.clone());

    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(flow.id.clone());

    walk_descendants(reader, flow, &mut visited, &mut closure.source_ids).await?;

    visited.remove(&flow.id);
    closure.flow_ids = visited;
    Ok(closure)
}

/// Computes the propagation closure of a source.
///
/// `source_ids` is seeded with the source's own id; every flow the source
/// owns lands in `flow_ids` along with its `source_id` and its transitive
/// descendants.
///
/// # Errors
///
/// Fetch errors surface unchanged.
pub async fn closure_for_source<R: CatalogReader + ?Sized>(
    reader: &R,
    source_id: &str,
) -> Result<PropagationClosure> {
    let mut closure = PropagationClosure::default();
    closure.source_ids.insert(source_id.to_string());

    let owned = reader.list_flows_by_source(source_id).await?;
    let mut visited: BTreeSet<String> = BTreeSet::new();
    for flow in &owned {
        visited.insert(flow.id.clone());
        closure.source_ids.extend(flow.source_id.clone());
    }
    for flow in &owned {
        walk_descendants(reader, flow, &mut visited, &mut closure.source_ids).await?;
    }

    closure.flow_ids = visited;
    Ok(closure)
}

/// Worklist walk over `flow_collection` descendants.
///
/// Ids enter `visited` the moment they are first seen; the fetch happens
/// afterwards, so a cyclic reference can never re-enter the worklist.
async fn walk_descendants<R: CatalogReader + ?Sized>(
    reader: &R,
    from: &Flow,
    visited: &mut BTreeSet<String>,
    source_ids: &mut BTreeSet<String>,
) -> Result<()> {
    let mut worklist: Vec<String> = Vec::new();
    enqueue_children(from, visited, &mut worklist);

    while let Some(id) = worklist.pop() {
        let child = reader.get_flow(&id).await?;
        source_ids.extend(child.source_id.clone());
        enqueue_children(&child, visited, &mut worklist);
    }
    Ok(())
}

/// Marks unseen children visited and queues them.
fn enqueue_children(flow: &Flow, visited: &mut BTreeSet<String>, worklist: &mut Vec<String>) {
    for child in flow.flow_collection.iter().flatten() {
        if visited.insert(child.id.clone()) {
            worklist.push(child.id.clone());
        }
    }
}

/// Applies one tag mutation to every id in the closure.
///
/// One request per id; the flow group and the source group fan out
/// concurrently. A failed request is logged and recorded in the report,
/// and the remaining ids in its group and the sibling group still run:
/// the batch never aborts.
pub async fn propagate_tag(
    writer: Arc<dyn TagWriter>,
    closure: &PropagationClosure,
    action: &TagAction,
) -> PropagationReport {
    let mut tasks: JoinSet<std::result::Result<(), PropagationFailure>> = JoinSet::new();
    let mut report = PropagationReport::default();

    let groups = [
        (EntityKind::Flow, &closure.flow_ids),
        (EntityKind::Source, &closure.source_ids),
    ];
    for (kind, ids) in groups {
        for id in ids {
            report.attempted += 1;
            let writer = Arc::clone(&writer);
            let action = action.clone();
            let id = id.clone();
            tasks.spawn(async move {
                let result = match &action {
                    TagAction::Update { name, value } => {
                        writer.put_tag(kind, &id, name, value).await
                    }
                    TagAction::Delete { name } => writer.delete_tag(kind, &id, name).await,
                };
                result.map_err(|error| PropagationFailure { kind, id, error })
            });
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(failure)) => {
                tracing::error!(
                    kind = %failure.kind,
                    id = %failure.id,
                    error = %failure.error,
                    "tag propagation request failed"
                );
                report.failures.push(failure);
            }
            Err(join_error) => {
                // A panicked task cannot be attributed to an id; count it
                // against the batch without aborting it.
                tracing::error!(error = %join_error, "tag propagation task failed to run");
            }
        }
    }

    report
}

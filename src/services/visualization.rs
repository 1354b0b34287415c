//! Visualization graph resolution.
//!
//! Answers "what is the full reference graph rooted at this entity" for the
//! diagram view: the transitive closure over `source_id`, `collected_by`,
//! `flow_collection` and `source_collection` edges, plus a one-hop record
//! of every Source node's owned Flows. No exclusion filtering: the diagram
//! shows the hierarchy as it is.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::catalog::CatalogReader;
use crate::models::{Entity, Flow};
use crate::services::EntityRef;
use crate::{Error, Result};

/// What one traversal task brought back.
enum Fetched {
    /// A single entity, recorded under its path and expanded further.
    Entity { path: String, entity: Entity },
    /// The owned Flows of a Source: recorded one-hop, never expanded.
    SourceFlows { flows: Vec<Flow> },
}

/// Resolves the visualization graph rooted at an entity.
///
/// Returns every reachable entity keyed by its `<collection>/<id>` path.
/// Distinct referenced paths are fetched concurrently; a single-threaded
/// coordinator owns the visited set and marks each path *before* spawning
/// its fetch, so cycles terminate, no path is fetched twice, and the result
/// does not depend on completion order.
///
/// # Errors
///
/// Any failed fetch aborts the traversal with its error; in-flight sibling
/// fetches are abandoned.
pub async fn build_graph(
    reader: Arc<dyn CatalogReader>,
    root: &EntityRef,
) -> Result<BTreeMap<String, Entity>> {
    let mut graph: BTreeMap<String, Entity> = BTreeMap::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut tasks: JoinSet<Result<Fetched>> = JoinSet::new();

    let root_path = root.path();
    visited.insert(root_path.clone());
    spawn_entity_fetch(&mut tasks, &reader, root_path);

    while let Some(joined) = tasks.join_next().await {
        let fetched = joined.map_err(|e| Error::Request {
            path: "<traversal task>".to_string(),
            cause: e.to_string(),
        })??;

        match fetched {
            Fetched::Entity { path, entity } => {
                expand(&entity, &mut visited, &mut tasks, &reader);
                graph.insert(path, entity);
            }
            Fetched::SourceFlows { flows } => {
                // One-hop records: shown in the graph, not expanded.
                for flow in flows {
                    let path = format!("flows/{}", flow.id);
                    if visited.insert(path.clone()) {
                        graph.insert(path, Entity::Flow(flow));
                    }
                }
            }
        }
    }

    tracing::debug!(root = %root.path(), entities = graph.len(), "visualization graph resolved");
    Ok(graph)
}

/// Queues every unseen path the entity references.
fn expand(
    entity: &Entity,
    visited: &mut BTreeSet<String>,
    tasks: &mut JoinSet<Result<Fetched>>,
    reader: &Arc<dyn CatalogReader>,
) {
    let mut referenced: Vec<String> = Vec::new();

    match entity {
        Entity::Flow(flow) => {
            if let Some(source_id) = &flow.source_id {
                referenced.push(format!("sources/{source_id}"));
            }
            for child in flow.flow_collection.iter().flatten() {
                referenced.push(format!("flows/{}", child.id));
            }
        }
        Entity::Source(source) => {
            // Every Source node also records its owned Flows, one hop.
            let source_id = source.id.clone();
            let reader = Arc::clone(reader);
            tasks.spawn(async move {
                let flows = reader.list_flows_by_source(&source_id).await?;
                Ok(Fetched::SourceFlows { flows })
            });

            for child in source.source_collection.iter().flatten() {
                referenced.push(format!("sources/{}", child.id));
            }
        }
    }

    // Back-references point at entities of the same kind.
    let collection = entity.kind().collection();
    for collector in entity.collected_by() {
        referenced.push(format!("{collection}/{collector}"));
    }

    for path in referenced {
        // Mark before fetch: the membership test is what terminates cycles.
        if visited.insert(path.clone()) {
            spawn_entity_fetch(tasks, reader, path);
        }
    }
}

/// Spawns one concurrent entity fetch.
fn spawn_entity_fetch(
    tasks: &mut JoinSet<Result<Fetched>>,
    reader: &Arc<dyn CatalogReader>,
    path: String,
) {
    let reader = Arc::clone(reader);
    tasks.spawn(async move {
        let entity = reader.get_entity(&path).await?;
        Ok(Fetched::Entity { path, entity })
    });
}

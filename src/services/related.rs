//! Related-flow resolution for playback.
//!
//! Picks the anchor flow for a viewing session and collects every flow
//! related to it through `flow_collection` references. Exclusion-tagged
//! flows are hidden from the result but still traversed: exclusion hides a
//! flow from playback, not from the hierarchy.

use std::collections::BTreeSet;

use crate::catalog::CatalogReader;
use crate::models::{EntityKind, Flow};
use crate::services::EntityRef;
use crate::{Error, Result};

/// The anchor flow of a viewing session and its related flows.
#[derive(Debug, Clone)]
pub struct RelatedFlows {
    /// The flow playback anchors on.
    pub anchor: Flow,
    /// Every related, non-excluded flow, sorted ascending by average bit
    /// rate (flows without one sort last, ties break on id).
    pub related: Vec<Flow>,
}

/// Resolves the anchor flow and its related flows for playback.
///
/// Rooted at a Flow, that flow is the anchor. Rooted at a Source, the
/// source's owned flows are filtered for exclusion and the first survivor
/// (store order) becomes the anchor, with the rest queued as related.
/// Either way the anchor's `flow_collection` children seed a sequential
/// LIFO worklist over the collection hierarchy; each id is fetched at most
/// once.
///
/// # Errors
///
/// Returns [`Error::NoValidFlows`] when the root flow is excluded or no
/// owned flow of the root source survives filtering; fetch errors surface
/// unchanged.
pub async fn resolve_related<R: CatalogReader + ?Sized>(
    reader: &R,
    root: &EntityRef,
) -> Result<RelatedFlows> {
    let mut queue: Vec<String> = Vec::new();

    let anchor = match root.kind {
        EntityKind::Flow => {
            let flow = reader.get_flow(&root.id).await?;
            if flow.is_excluded() {
                tracing::warn!(flow = %root.id, "root flow is exclusion-tagged");
                return Err(Error::NoValidFlows);
            }
            flow
        }
        EntityKind::Source => {
            let owned = reader.list_flows_by_source(&root.id).await?;
            let mut survivors = owned.into_iter().filter(|f| !f.is_excluded());
            let Some(first) = survivors.next() else {
                tracing::warn!(source = %root.id, "every owned flow is exclusion-tagged");
                return Err(Error::NoValidFlows);
            };
            queue.extend(survivors.map(|f| f.id));
            // Re-fetch the anchor so it carries its timerange.
            reader.get_flow(&first.id).await?
        }
    };

    for child in anchor.flow_collection.iter().flatten() {
        queue.push(child.id.clone());
    }

    let mut checked: BTreeSet<String> = BTreeSet::new();
    checked.insert(anchor.id.clone());

    let mut related: Vec<Flow> = Vec::new();
    while let Some(id) = queue.pop() {
        if !checked.insert(id.clone()) {
            continue;
        }
        let flow = reader.get_flow(&id).await?;
        if let Some(children) = &flow.flow_collection {
            queue.extend(
                children
                    .iter()
                    .filter(|child| !checked.contains(&child.id))
                    .map(|child| child.id.clone()),
            );
        }
        if !flow.is_excluded() {
            related.push(flow);
        }
    }

    // Deterministic order: bit rate ascending, absent bit rates last, id
    // as the tie-break.
    related.sort_by(|a, b| {
        let key = |f: &Flow| (f.avg_bit_rate.unwrap_or(i64::MAX), f.id.clone());
        key(a).cmp(&key(b))
    });

    Ok(RelatedFlows { anchor, related })
}

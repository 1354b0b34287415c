//! Player payload assembly.
//!
//! Gathers everything the embedded player needs for one viewing session:
//! the anchor flow, its related flows, the hull of their validity spans,
//! the playback window, and the segments of every flow within that window.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::catalog::CatalogReader;
use crate::models::{Flow, Moment, Segment, Timerange};
use crate::services::segmentation::{
    SEGMENT_PROBE_LIMIT, filter_playable, select_default_window,
};
use crate::services::{EntityRef, resolve_related};
use crate::{Error, Result};

/// Everything the player widget consumes for one viewing session.
#[derive(Debug, Clone)]
pub struct PlayerData {
    /// The anchor flow.
    pub flow: Flow,
    /// Related flows, bit-rate sorted.
    pub related_flows: Vec<Flow>,
    /// Hull of the playable flows' validity spans, `[min start_max end)`;
    /// all-time when nothing was playable.
    pub max_timerange: Timerange,
    /// The playback window actually in effect.
    pub window: Timerange,
    /// Segments within the window, keyed by flow id.
    pub flow_segments: BTreeMap<String, Vec<Segment>>,
}

/// Assembles the player payload for an entity.
///
/// Resolves related flows, computes the validity hull, picks a default
/// window via segmentation when the caller supplied none, then fetches the
/// segments of every flow within the window concurrently. Segments the
/// window probe already fetched for the anchor are reused, not refetched.
///
/// # Errors
///
/// Surfaces [`Error::NoValidFlows`] from related-flow resolution and any
/// fetch error unchanged.
pub async fn load_player_data(
    reader: Arc<dyn CatalogReader>,
    root: &EntityRef,
    window: Option<Timerange>,
) -> Result<PlayerData> {
    let resolved = resolve_related(reader.as_ref(), root).await?;
    let (anchor, related) = (resolved.anchor, resolved.related);

    let mut all_flows = Vec::with_capacity(related.len() + 1);
    all_flows.push(anchor.clone());
    all_flows.extend(related.iter().cloned());
    let playable = filter_playable(all_flows);

    let max_timerange = validity_hull(playable.iter().map(|p| (p.start, p.end)));

    let mut flow_segments: BTreeMap<String, Vec<Segment>> = BTreeMap::new();
    let window = if let Some(window) = window {
        window
    } else {
        let selection = select_default_window(reader.as_ref(), &playable).await?;
        if let (Some(flow_id), Some(segments)) = (selection.anchor_flow_id, selection.segments) {
            flow_segments.insert(flow_id, segments);
        }
        selection.window
    };

    let mut tasks: JoinSet<Result<(String, Vec<Segment>)>> = JoinSet::new();
    for flow_id in std::iter::once(&anchor.id).chain(related.iter().map(|f| &f.id)) {
        if flow_segments.contains_key(flow_id) {
            continue;
        }
        let reader = Arc::clone(&reader);
        let flow_id = flow_id.clone();
        tasks.spawn(async move {
            let segments = reader
                .list_segments(&flow_id, &window, SEGMENT_PROBE_LIMIT, false)
                .await?;
            Ok((flow_id, segments))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (flow_id, segments) = joined.map_err(|e| Error::Request {
            path: "<segment fetch task>".to_string(),
            cause: e.to_string(),
        })??;
        flow_segments.insert(flow_id, segments);
    }

    Ok(PlayerData {
        flow: anchor,
        related_flows: related,
        max_timerange,
        window,
        flow_segments,
    })
}

/// Hull of a set of bounded spans: earliest start to latest end, half-open.
fn validity_hull(spans: impl IntoIterator<Item = (Moment, Moment)>) -> Timerange {
    let mut bounds: Option<(Moment, Moment)> = None;
    for (start, end) in spans {
        bounds = Some(match bounds {
            None => (start, end),
            Some((min, max)) => (min.min(start), max.max(end)),
        });
    }
    bounds.map_or_else(Timerange::all, |(min, max)| Timerange::from_bounds(min, max))
}

//! Default playback window selection.
//!
//! A viewing session that arrives without an explicit window gets one
//! chosen from the segments the store actually holds: probe the trailing
//! five minutes of the flow that ends earliest and span whatever segments
//! come back.

use crate::catalog::CatalogReader;
use crate::models::{Flow, Moment, Segment, Timerange};
use crate::Result;

/// Length of the probe window, in seconds.
pub const DEFAULT_SEGMENTATION_SECS: i64 = 300;

/// Maximum number of segments fetched by one probe.
pub const SEGMENT_PROBE_LIMIT: usize = 300;

/// A flow eligible for segmentation: it has a container and a bounded,
/// non-empty validity timerange.
#[derive(Debug, Clone)]
pub struct PlayableFlow {
    /// The flow record.
    pub flow: Flow,
    /// Parsed start of the flow's validity span.
    pub start: Moment,
    /// Parsed end of the flow's validity span.
    pub end: Moment,
}

/// The selected default window.
#[derive(Debug, Clone)]
pub struct SegmentationWindow {
    /// The window to hand to the player.
    pub window: Timerange,
    /// The flow whose segments were fetched while probing, when the probe
    /// found enough of them to be worth caching.
    pub anchor_flow_id: Option<String>,
    /// The probed segments, returned so the caller can reuse them instead
    /// of refetching the anchor flow.
    pub segments: Option<Vec<Segment>>,
}

impl SegmentationWindow {
    /// A fail-soft result: everything unbounded, nothing cached.
    fn open_ended() -> Self {
        Self {
            window: Timerange::all(),
            anchor_flow_id: None,
            segments: None,
        }
    }
}

/// Filters flows down to those segmentation can work with.
///
/// A flow without a container cannot have segments registered; a flow whose
/// timerange is absent, malformed (parses to empty), or unbounded on either
/// side gives the probe nothing to anchor on. Both are dropped.
#[must_use]
pub fn filter_playable(flows: impl IntoIterator<Item = Flow>) -> Vec<PlayableFlow> {
    flows
        .into_iter()
        .filter(|flow| flow.container.is_some())
        .filter_map(|flow| {
            let range = flow.parsed_timerange()?;
            if range.is_empty() {
                return None;
            }
            let (start, end) = (range.start()?, range.end()?);
            Some(PlayableFlow { flow, start, end })
        })
        .collect()
}

/// Picks a default playback window from the candidate flows' segments.
///
/// Video flows take priority when any are present. The candidate whose
/// validity span ends earliest (ties break on the smaller flow id) has its
/// trailing [`DEFAULT_SEGMENTATION_SECS`] probed, ascending, capped at
/// [`SEGMENT_PROBE_LIMIT`] segments:
///
/// - no segments: an all-time window, nothing cached
/// - one segment: that segment's own timerange, nothing cached
/// - two or more: first start to last end, half-open, with the fetched
///   segments returned for reuse
///
/// # Errors
///
/// Returns the segment fetch's error unchanged.
pub async fn select_default_window<R: CatalogReader + ?Sized>(
    reader: &R,
    candidates: &[PlayableFlow],
) -> Result<SegmentationWindow> {
    let videos: Vec<&PlayableFlow> = candidates.iter().filter(|c| c.flow.is_video()).collect();
    let pool: Vec<&PlayableFlow> = if videos.is_empty() {
        candidates.iter().collect()
    } else {
        videos
    };

    let Some(chosen) = pool
        .iter()
        .min_by(|a, b| a.end.cmp(&b.end).then_with(|| a.flow.id.cmp(&b.flow.id)))
    else {
        tracing::debug!("no playable flows; defaulting to an open window");
        return Ok(SegmentationWindow::open_ended());
    };

    let probe = Timerange::from_bounds(chosen.end.sub_secs(DEFAULT_SEGMENTATION_SECS), chosen.end);
    let segments = reader
        .list_segments(&chosen.flow.id, &probe, SEGMENT_PROBE_LIMIT, false)
        .await?;

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Ok(SegmentationWindow::open_ended());
    };

    if segments.len() == 1 {
        return Ok(SegmentationWindow {
            window: first.timerange,
            anchor_flow_id: None,
            segments: None,
        });
    }

    let window = Timerange::new(first.timerange.start(), last.timerange.end(), true, false);
    Ok(SegmentationWindow {
        window,
        anchor_flow_id: Some(chosen.flow.id.clone()),
        segments: Some(segments),
    })
}

//! Traversals and selections over the Source/Flow reference graph.
//!
//! Each operation here is a pure function of the records an injected
//! [`crate::catalog::CatalogReader`] returns. Every traversal owns its
//! visited set for the duration of one call; ids are marked visited
//! *before* their fetch is issued, so cyclic and duplicated references
//! terminate and the merged result is independent of fetch completion
//! order.

mod player;
mod propagation;
mod related;
mod segmentation;
mod visualization;

pub use player::{PlayerData, load_player_data};
pub use propagation::{
    PropagationClosure, PropagationFailure, PropagationReport, TagAction, closure_for_flow,
    closure_for_source, propagate_tag,
};
pub use related::{RelatedFlows, resolve_related};
pub use segmentation::{
    DEFAULT_SEGMENTATION_SECS, PlayableFlow, SEGMENT_PROBE_LIMIT, SegmentationWindow,
    filter_playable, select_default_window,
};
pub use visualization::build_graph;

use crate::models::EntityKind;

/// A reference to one catalog entity by kind and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Which collection the entity lives in.
    pub kind: EntityKind,
    /// Opaque entity id.
    pub id: String,
}

impl EntityRef {
    /// A reference to a Flow.
    #[must_use]
    pub fn flow(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Flow,
            id: id.into(),
        }
    }

    /// A reference to a Source.
    #[must_use]
    pub fn source(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Source,
            id: id.into(),
        }
    }

    /// The store path of the referenced entity, `<collection>/<id>`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind.collection(), self.id)
    }
}

//! Data model: exact timerange algebra and catalog entity records.

pub mod entity;
pub mod timerange;

pub use entity::{
    CollectionRef, EXCLUSION_TAG, Entity, EntityKind, Flow, Format, GetUrl, Segment, Source,
};
pub use timerange::{Duration, Moment, NANOS_PER_SECOND, Timerange};

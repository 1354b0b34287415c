//! Catalog entity records: Sources, Flows and Segments.
//!
//! The store serves both entity kinds from similarly-shaped JSON objects;
//! only the presence of `source_id` tells a Flow apart from a Source.
//! [`Entity`] makes that discrimination once, at decode time, so the rest
//! of the crate never probes fields to learn what it is holding.
//!
//! Records are request-scoped copies: nothing here caches entity state
//! beyond a single traversal. Unknown fields ride along in a flattened
//! map because records travel onward to display consumers unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;
use serde_json::Value;

use super::timerange::Timerange;

/// Tag key marking a flow as hidden from playback.
pub const EXCLUSION_TAG: &str = "hls_exclude";

/// The two catalog entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A logical media source.
    Source,
    /// One essence track representing a source.
    Flow,
}

impl EntityKind {
    /// The store's collection segment for this kind (`sources` / `flows`).
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Source => "sources",
            Self::Flow => "flows",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Essence format of a Source or Flow, as an NMOS URN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum Format {
    /// `urn:x-nmos:format:video`
    #[serde(rename = "urn:x-nmos:format:video")]
    Video,
    /// `urn:x-nmos:format:audio`
    #[serde(rename = "urn:x-nmos:format:audio")]
    Audio,
    /// `urn:x-nmos:format:data`
    #[serde(rename = "urn:x-nmos:format:data")]
    Data,
    /// `urn:x-nmos:format:image`
    #[serde(rename = "urn:x-nmos:format:image")]
    Image,
    /// `urn:x-nmos:format:multi` (a bundle of other flows)
    #[serde(rename = "urn:x-nmos:format:multi")]
    Multi,
    /// Any URN this crate does not know about.
    #[serde(untagged)]
    Other(String),
}

/// A reference to a collected child entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct CollectionRef {
    /// Id of the referenced entity.
    pub id: String,
    /// Collection metadata the store attaches to the edge.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A Flow record: one essence track belonging to a Source.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct Flow {
    /// Opaque flow id.
    pub id: String,
    /// Owning source. Present on every store-served flow; optional here so
    /// partially-populated records decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Essence format URN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media container MIME type; a flow without one cannot have segments
    /// registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Average bit rate in bits per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_bit_rate: Option<i64>,
    /// Free-form tags, including the playback exclusion tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Ordered child-flow references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_collection: Option<Vec<CollectionRef>>,
    /// Ids of flows that collect this one. A back-reference, never an
    /// ownership edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_by: Option<Vec<String>>,
    /// Validity span of the flow's essence, in the store's text grammar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timerange: Option<String>,
    /// Everything else the store sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Flow {
    /// Whether the exclusion tag hides this flow from playback.
    ///
    /// The tag value is compared case-insensitively against `"true"`;
    /// exclusion hides a flow from playback but not from the hierarchy.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.tags
            .get(EXCLUSION_TAG)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// The flow's validity span, leniently parsed.
    ///
    /// `None` when the record carries no timerange at all; a malformed one
    /// parses to [`Timerange::empty`].
    #[must_use]
    pub fn parsed_timerange(&self) -> Option<Timerange> {
        self.timerange.as_deref().map(Timerange::parse)
    }

    /// Whether the flow's format is video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.format == Some(Format::Video)
    }
}

/// A Source record: a logical media source which may collect other Sources.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct Source {
    /// Opaque source id.
    pub id: String,
    /// Essence format URN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Ordered child-source references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_collection: Option<Vec<CollectionRef>>,
    /// Ids of sources that collect this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_by: Option<Vec<String>>,
    /// Everything else the store sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A catalog entity, discriminated at decode time.
///
/// The store's records carry no explicit type marker; a record with a
/// `source_id` key is a Flow, anything else is a Source. That check happens
/// exactly once, in `Deserialize`, so downstream code matches on the
/// variant instead of probing fields.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Entity {
    /// A Source record.
    Source(Source),
    /// A Flow record.
    Flow(Flow),
}

impl Entity {
    /// The entity's opaque id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Source(s) => &s.id,
            Self::Flow(f) => &f.id,
        }
    }

    /// Which kind of entity this is.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Source(_) => EntityKind::Source,
            Self::Flow(_) => EntityKind::Flow,
        }
    }

    /// The store path of this entity, `<collection>/<id>`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind().collection(), self.id())
    }

    /// Back-references to entities that collect this one.
    #[must_use]
    pub fn collected_by(&self) -> &[String] {
        let refs = match self {
            Self::Source(s) => s.collected_by.as_deref(),
            Self::Flow(f) => f.collected_by.as_deref(),
        };
        refs.unwrap_or_default()
    }

    /// The flow record, if this is a Flow.
    #[must_use]
    pub const fn as_flow(&self) -> Option<&Flow> {
        match self {
            Self::Flow(f) => Some(f),
            Self::Source(_) => None,
        }
    }

    /// The source record, if this is a Source.
    #[must_use]
    pub const fn as_source(&self) -> Option<&Source> {
        match self {
            Self::Source(s) => Some(s),
            Self::Flow(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Some(object) = value.as_object() else {
            return Err(de::Error::custom("entity record is not a JSON object"));
        };
        if object.contains_key("source_id") {
            Flow::deserialize(value).map(Self::Flow).map_err(de::Error::custom)
        } else {
            Source::deserialize(value).map(Self::Source).map_err(de::Error::custom)
        }
    }
}

/// One retrieval location of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct GetUrl {
    /// Retrieval URL.
    pub url: String,
    /// Store label for the location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A time-bounded, independently retrievable chunk of a Flow's essence.
///
/// Segments are immutable from this crate's point of view; deletions happen
/// asynchronously out of band in the store.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct Segment {
    /// Id of the stored essence object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// The segment's own interval.
    pub timerange: Timerange,
    /// Retrieval locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_urls: Option<Vec<GetUrl>>,
    /// Timestamp offset applied on retrieval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_offset: Option<String>,
    /// Sample offset into the essence object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_offset: Option<i64>,
    /// Number of samples in the segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<i64>,
    /// Everything else the store sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

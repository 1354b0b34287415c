//! # Tamscope
//!
//! Browsing core for a Time-Addressable Media Store (TAMS) catalog.
//!
//! A TAMS store holds **Sources**, the **Flows** that represent them, and
//! the time-bounded **Segments** that carry each Flow's essence. Tamscope
//! implements the exact algebra and the traversals a catalog browser needs
//! on top of that store:
//!
//! - Lossless parsing and formatting of the store's timerange text grammar
//!   with pure integer arithmetic ([`models::Timerange`])
//! - Cursor-linked collection pagination ([`catalog::fetch_all`])
//! - Visualization-graph resolution over the Source/Flow reference graph,
//!   safe on cycles ([`services::build_graph`])
//! - Related-flow resolution for playback with exclusion-tag filtering
//!   ([`services::resolve_related`])
//! - Default playback window selection from segment probes
//!   ([`services::select_default_window`])
//! - Tag propagation closures and never-abort bulk application
//!   ([`services::closure_for_flow`], [`services::propagate_tag`])
//!
//! Transport retry policy, authentication-token acquisition, rendering and
//! the player widget are collaborators behind the [`catalog::CatalogReader`]
//! and [`catalog::TagWriter`] seams; tests inject in-memory doubles.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tamscope::catalog::Catalog;
//! use tamscope::config::StoreConfig;
//! use tamscope::services::{EntityRef, resolve_related};
//!
//! let catalog = Catalog::new(StoreConfig::new("https://store.example/v1"));
//! let related = resolve_related(&catalog, &EntityRef::source("src-1")).await?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod catalog;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogReader, Page, TagWriter, fetch_all};
pub use config::StoreConfig;
pub use models::{Entity, Flow, Format, Moment, Segment, Source, Timerange};
pub use services::{
    EntityRef, PlayerData, PropagationClosure, PropagationReport, RelatedFlows,
    SegmentationWindow, TagAction, build_graph, closure_for_flow, closure_for_source,
    propagate_tag, resolve_related, select_default_window,
};

/// Error type for tamscope operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Request` | The store rejected or failed a request (transport error, non-2xx status) |
/// | `Decode` | A response body did not fit the entity model |
/// | `UnexpectedShape` | A paginated response body was not a JSON list |
/// | `NoValidFlows` | Every candidate flow for playback was exclusion-tagged or absent |
///
/// Malformed timerange text is *not* an error: display paths require the
/// lenient collapse to the canonical empty range (see
/// [`models::Timerange::parse`]). Per-id failures during bulk tag
/// propagation are collected into a [`services::PropagationReport`] rather
/// than raised, so one bad id never aborts the batch.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A request to the store failed.
    ///
    /// Raised when:
    /// - The transport layer fails (DNS, TLS, connection reset)
    /// - The store answers with a non-success status code
    #[error("request to '{path}' failed: {cause}")]
    Request {
        /// Store-relative path of the failed request.
        path: String,
        /// The underlying cause.
        cause: String,
    },

    /// A response body could not be decoded into the entity model.
    ///
    /// Raised when:
    /// - An entity record is not a JSON object
    /// - A record is missing its mandatory `id`
    /// - JSON deserialization fails for a flow, source or segment
    #[error("could not decode response from '{path}': {cause}")]
    Decode {
        /// Store-relative path of the request whose body failed to decode.
        path: String,
        /// The underlying cause.
        cause: String,
    },

    /// A paginated response body was not a JSON list.
    ///
    /// Raised by [`catalog::fetch_all`] when the first page of a collection
    /// query carries anything other than an array. Fatal to that fetch.
    #[error("unexpected response shape from '{path}': {detail}")]
    UnexpectedShape {
        /// Store-relative path of the offending page.
        path: String,
        /// What was found instead of a list.
        detail: String,
    },

    /// No playable flow survived exclusion filtering.
    ///
    /// Raised by [`services::resolve_related`] when the root flow is itself
    /// exclusion-tagged, or when every flow of the root source is.
    #[error("no valid flows found")]
    NoValidFlows,
}

/// Result type alias for tamscope operations.
pub type Result<T> = std::result::Result<T, Error>;

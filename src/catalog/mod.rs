//! Catalog access: fetch capabilities and the paginated collection walker.
//!
//! Every traversal in [`crate::services`] reaches the store through the
//! [`CatalogReader`] seam, and tag mutations go through [`TagWriter`].
//! Both are object-safe async traits, so the concrete [`Catalog`] HTTP
//! client and the in-memory doubles the tests inject are interchangeable.
//!
//! The typed lookups (`get_flow`, `list_segments`, ...) are default methods
//! built on the single raw [`CatalogReader::get`] primitive; an
//! implementation only has to answer GETs.

mod http;
mod pagination;

pub use http::Catalog;
pub use pagination::fetch_all;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Entity, EntityKind, Flow, Segment, Source, Timerange};
use crate::{Error, Result};

/// One response from the store: the JSON body plus the next-page cursor.
#[derive(Debug, Clone)]
pub struct Page {
    /// Parsed response body.
    pub body: Value,
    /// Store-relative path of the next page, when the store offered one.
    pub next: Option<String>,
}

impl Page {
    /// A terminal page with no continuation.
    #[must_use]
    pub const fn last(body: Value) -> Self {
        Self { body, next: None }
    }
}

/// Read capability over the catalog.
///
/// Implementations answer raw GETs for store-relative paths; the typed
/// lookups layer decoding and pagination on top. All traversals are pure
/// functions of the data these methods return, so an implementation needs
/// no state beyond its transport.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// GETs one store-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] when the transport fails or the store
    /// answers with a non-success status.
    async fn get(&self, path: &str) -> Result<Page>;

    /// Fetches one Flow with its validity timerange included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] on transport failure and [`Error::Decode`]
    /// when the body is not a flow record.
    async fn get_flow(&self, id: &str) -> Result<Flow> {
        let path = format!("flows/{id}?include_timerange=true");
        decode(&path, self.get(&path).await?.body)
    }

    /// Fetches one Source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] on transport failure and [`Error::Decode`]
    /// when the body is not a source record.
    async fn get_source(&self, id: &str) -> Result<Source> {
        let path = format!("sources/{id}");
        decode(&path, self.get(&path).await?.body)
    }

    /// Fetches one entity of either kind by its `<collection>/<id>` path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] on transport failure and [`Error::Decode`]
    /// when the body is not an entity record.
    async fn get_entity(&self, path: &str) -> Result<Entity> {
        decode(path, self.get(path).await?.body)
    }

    /// Lists every Flow owned by a Source, following pagination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] when the listing is not a JSON
    /// list, [`Error::Request`]/[`Error::Decode`] as above.
    async fn list_flows_by_source(&self, source_id: &str) -> Result<Vec<Flow>> {
        let path = format!("flows?source_id={source_id}");
        fetch_all(self, &path, None)
            .await?
            .into_iter()
            .map(|record| decode(&path, record))
            .collect()
    }

    /// Lists segments of a Flow within a window, following pagination up to
    /// `limit` records.
    ///
    /// `limit` doubles as the store-side page size and the overall cap;
    /// `reverse` asks the store for descending time order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedShape`] when the listing is not a JSON
    /// list, [`Error::Request`]/[`Error::Decode`] as above.
    async fn list_segments(
        &self,
        flow_id: &str,
        window: &Timerange,
        limit: usize,
        reverse: bool,
    ) -> Result<Vec<Segment>> {
        let path =
            format!("flows/{flow_id}/segments?timerange={window}&limit={limit}&reverse_order={reverse}");
        fetch_all(self, &path, Some(limit))
            .await?
            .into_iter()
            .map(|record| decode(&path, record))
            .collect()
    }
}

/// Tag mutation capability over the catalog.
#[async_trait]
pub trait TagWriter: Send + Sync {
    /// Creates or updates one tag on one entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] when the store rejects the mutation.
    async fn put_tag(&self, kind: EntityKind, id: &str, name: &str, value: &str) -> Result<()>;

    /// Deletes one tag from one entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] when the store rejects the mutation.
    async fn delete_tag(&self, kind: EntityKind, id: &str, name: &str) -> Result<()>;
}

/// Decodes a response body, attributing failures to the requested path.
fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| Error::Decode {
        path: path.to_string(),
        cause: e.to_string(),
    })
}

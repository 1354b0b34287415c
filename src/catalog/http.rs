//! HTTP implementation of the catalog capabilities.

use async_trait::async_trait;

use super::{CatalogReader, Page, TagWriter};
use crate::config::StoreConfig;
use crate::models::EntityKind;
use crate::{Error, Result};

/// Reqwest-backed TAMS store client.
///
/// Owns no retry or backoff policy: a failed request surfaces as
/// [`Error::Request`] and retrying is the caller's decision. Token
/// acquisition is equally out of scope; the configured bearer token is sent
/// verbatim when present.
pub struct Catalog {
    /// Store configuration.
    config: StoreConfig,
    /// HTTP client.
    client: reqwest::Client,
}

impl Catalog {
    /// Creates a client for the configured store.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    /// The configured store endpoint, without a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.config.endpoint.trim_end_matches('/')
    }

    /// Absolute URL for a store-relative path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint(), path.trim_start_matches('/'))
    }

    /// Attaches the bearer token when one is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends one request and checks the status.
    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::Request {
                path: path.to_string(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request {
                path: path.to_string(),
                cause: format!("{status}{}{body}", if body.is_empty() { "" } else { ": " }),
            });
        }
        Ok(response)
    }

    /// Turns an absolute next-page URL back into a store-relative path.
    ///
    /// The store links to its own endpoint; anything else is kept verbatim
    /// so the failure shows up attributed to the odd path.
    fn relativize(&self, link: &str) -> String {
        link.strip_prefix(self.endpoint())
            .map_or_else(|| link.to_string(), |rest| rest.trim_start_matches('/').to_string())
    }
}

#[async_trait]
impl CatalogReader for Catalog {
    async fn get(&self, path: &str) -> Result<Page> {
        tracing::debug!(path, "store GET");
        let response = self.send(path, self.client.get(self.url(path))).await?;

        let next = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link)
            .map(|link| self.relativize(&link));

        let body = response.json().await.map_err(|e| Error::Decode {
            path: path.to_string(),
            cause: e.to_string(),
        })?;

        Ok(Page { body, next })
    }
}

#[async_trait]
impl TagWriter for Catalog {
    async fn put_tag(&self, kind: EntityKind, id: &str, name: &str, value: &str) -> Result<()> {
        let path = format!("{kind}/{id}/tags/{name}");
        tracing::debug!(path, "store PUT tag");
        let request = self.client.put(self.url(&path)).json(&value);
        self.send(&path, request).await.map(|_| ())
    }

    async fn delete_tag(&self, kind: EntityKind, id: &str, name: &str) -> Result<()> {
        let path = format!("{kind}/{id}/tags/{name}");
        tracing::debug!(path, "store DELETE tag");
        self.send(&path, self.client.delete(self.url(&path)))
            .await
            .map(|_| ())
    }
}

/// Extracts the `rel="next"` target from an RFC 8288 Link header.
fn next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        if !(target.starts_with('<') && target.ends_with('>')) {
            continue;
        }
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param.eq_ignore_ascii_case("rel=\"next\"") || param.eq_ignore_ascii_case("rel=next")
        });
        if is_next {
            return Some(target[1..target.len() - 1].to_string());
        }
    }
    None
}

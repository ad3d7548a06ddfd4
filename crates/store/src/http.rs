//! HTTP client for the remote content store.
//!
//! Objects live under `{base_url}/buckets/{bucket}/objects`. Reads carry the
//! read key as a query parameter; writes send the write key as a bearer
//! token. A 404 on a query means "no objects", not failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use tally_shared::config::StoreConfig;

use crate::client::ContentStore;
use crate::error::StoreError;
use crate::object::{NewObject, ObjectPatch, ObjectQuery, StoredObject};

#[derive(Debug, Deserialize)]
struct ObjectsResponse {
    #[serde(default)]
    objects: Vec<StoredObject>,
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    object: StoredObject,
}

/// Content store reached over HTTP.
#[derive(Clone)]
pub struct HttpContentStore {
    client: Client,
    objects_url: String,
    read_key: Option<String>,
    write_key: Option<String>,
    depth: u8,
}

impl std::fmt::Debug for HttpContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContentStore")
            .field("objects_url", &self.objects_url)
            .field("read_key", &self.read_key.as_ref().map(|_| "[hidden]"))
            .field("write_key", &self.write_key.as_ref().map(|_| "[hidden]"))
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl HttpContentStore {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the bucket is missing or the HTTP
    /// client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.bucket.trim().is_empty() {
            return Err(StoreError::Config("store.bucket is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            client,
            objects_url: format!(
                "{}/buckets/{}/objects",
                config.base_url.trim_end_matches('/'),
                config.bucket.trim()
            ),
            read_key: non_blank_key(config.read_key.as_deref()),
            write_key: non_blank_key(config.write_key.as_deref()),
            depth: config.depth,
        })
    }

    /// Returns the collection URL objects are read from and written to.
    #[must_use]
    pub fn objects_url(&self) -> &str {
        &self.objects_url
    }

    /// Builds the query-string parameters for a find request.
    #[must_use]
    pub fn find_params(&self, query: &ObjectQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("query".to_string(), query.to_query_document().to_string()),
            ("depth".to_string(), self.depth.to_string()),
        ];
        if !query.props.is_empty() {
            params.push(("props".to_string(), query.props.join(",")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(key) = &self.read_key {
            params.push(("read_key".to_string(), key.clone()));
        }
        params
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.write_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn error_for(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, "Content store request failed");
        StoreError::Status { status, body }
    }
}

/// An empty key from configuration means no key.
fn non_blank_key(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<StoredObject>, StoreError> {
        debug!(object_type = %query.object_type, "Querying content store");
        let response = self
            .client
            .get(&self.objects_url)
            .query(&self.find_params(query))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_success() => {
                Ok(response.json::<ObjectsResponse>().await?.objects)
            }
            _ => Err(Self::error_for(response).await),
        }
    }

    async fn insert(&self, object: NewObject) -> Result<StoredObject, StoreError> {
        let response = self
            .authorized(self.client.post(&self.objects_url))
            .json(&object)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }
        Ok(response.json::<ObjectResponse>().await?.object)
    }

    async fn update(&self, id: &str, patch: ObjectPatch) -> Result<StoredObject, StoreError> {
        let response = self
            .authorized(self.client.patch(format!("{}/{id}", self.objects_url)))
            .json(&patch)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.to_string())),
            status if status.is_success() => Ok(response.json::<ObjectResponse>().await?.object),
            _ => Err(Self::error_for(response).await),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.delete(format!("{}/{id}", self.objects_url)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.to_string())),
            status if status.is_success() => Ok(()),
            _ => Err(Self::error_for(response).await),
        }
    }
}

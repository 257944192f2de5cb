//! REST client for the hosted data store's row operations.
//!
//! The store exposes tables at `/rest/v1/{table}` with equality filters as
//! query parameters (`?user_id=eq.<uuid>`) and `Prefer` headers selecting
//! upsert resolution and representation. This client owns request assembly,
//! authentication headers, and error decoding; table semantics live in the
//! service layer.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::StoreConfig;
use crate::store::StoreError;

/// Error body returned by the store's REST surface.
#[derive(Debug, serde::Deserialize)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(alias = "error_description", alias = "msg")]
    description: Option<String>,
}

/// Client for the hosted store's row-level CRUD surface.
///
/// Cheaply cloneable; all requests carry the service key and are scoped to
/// a user by explicit equality filters supplied by the caller.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    rest_endpoint: String,
    api_key: String,
}

impl StoreClient {
    /// Create a new store client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let rest_endpoint = format!("{}/rest/v1", config.project_url.trim_end_matches('/'));

        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                rest_endpoint,
                api_key: config.service_key.expose_secret().to_string(),
            }),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, format!("{}/{}", self.inner.rest_endpoint, table))
            .header("apikey", &self.inner.api_key)
            .bearer_auth(&self.inner.api_key)
    }

    /// Select rows from a table with equality filters.
    ///
    /// `select` is the store's column/embedding expression (usually `"*"`,
    /// or `"*,order_items(*)"` to embed dependent rows). `filters` are
    /// `(column, "eq.<value>")` pairs; `order` is an optional
    /// `column.direction` expression.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on transport failure, [`StoreError::Api`]
    /// if the store rejects the query, or [`StoreError::Parse`] if the rows
    /// do not match `T`.
    #[instrument(skip(self, filters), fields(table = %table))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        filters: &[(&str, String)],
        order: Option<&str>,
    ) -> Result<Vec<T>, StoreError> {
        let mut request = self
            .request(reqwest::Method::GET, table)
            .query(&[("select", select)])
            .query(filters);
        if let Some(order) = order {
            request = request.query(&[("order", order)]);
        }

        let response = request.send().await?;
        let body = Self::check(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Insert a row and read back the stored representation.
    ///
    /// The store assigns server-side columns (id, timestamps); the returned
    /// row includes them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] with the store's error code on rejection
    /// (including unique violations), or [`StoreError::NotFound`] if the
    /// store returns no representation.
    #[instrument(skip(self, row), fields(table = %table))]
    pub async fn insert_returning<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R, StoreError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let body = Self::check(response).await?;
        let mut rows: Vec<R> = serde_json::from_str(&body)?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound(format!("{table}: insert returned no rows")))
    }

    /// Insert one or more rows without reading them back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] with the store's error code on rejection.
    #[instrument(skip(self, rows), fields(table = %table))]
    pub async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        rows: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Insert-or-update keyed by the table's declared uniqueness constraint.
    ///
    /// `on_conflict` names the conflict-target columns (e.g.
    /// `"user_id,product_id,selected_color"`). On conflict the incoming row
    /// overwrites the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the store rejects the write.
    #[instrument(skip(self, row), fields(table = %table, on_conflict = %on_conflict))]
    pub async fn upsert<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
        on_conflict: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Update columns on rows matching the equality filters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the store rejects the write.
    #[instrument(skip(self, patch, filters), fields(table = %table))]
    pub async fn update<T: Serialize + Sync>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(filters)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Delete rows matching the equality filters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] if the store rejects the delete.
    #[instrument(skip(self, filters), fields(table = %table))]
    pub async fn delete(&self, table: &str, filters: &[(&str, String)]) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(filters)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Turn a non-success response into a [`StoreError::Api`], preserving
    /// the store's error code so callers can distinguish unique violations.
    async fn check(response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let parsed: Option<RestErrorBody> = serde_json::from_str(&body).ok();
        let (code, message) = parsed.map_or_else(
            || (None, body.chars().take(200).collect::<String>()),
            |e| {
                let message = e
                    .message
                    .or(e.description)
                    .unwrap_or_else(|| "(no error details provided)".to_string());
                (e.code, message)
            },
        );

        tracing::debug!(status = %status, code = ?code, "store rejected request");

        Err(StoreError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote catalog access.
//!
//! The service exposes two routes: `GET <collection>` returns every entry and
//! `GET <collection>/<id>` returns one. A missing entry is reported either with a 404 or with an
//! `{"error": "..."}` body, depending on the deployment, so both are treated as not-found.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::model::{CatalogEntry, EntryId};

pub const DEFAULT_API_URL: &str = "https://api-perritos-dani.azurewebsites.net/index.php/dogs";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("could not reach the catalog service: {message}")]
    Connection { message: String },
    #[error("catalog service sent an unexpected response: {message}")]
    Malformed { message: String },
    #[error("entry {id} not found: {message}")]
    NotFound { id: EntryId, message: String },
}

impl CatalogError {
    /// Whether the failure belongs on the connection banner (as opposed to a missing entry).
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Malformed { .. })
    }

    fn connection(message: impl ToString) -> Self {
        Self::Connection {
            message: message.to_string(),
        }
    }

    fn malformed(message: impl ToString) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

/// Source of catalog entries.
pub trait CatalogClient: Send + Sync {
    fn fetch_catalog(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send;

    fn fetch_entry(
        &self,
        id: EntryId,
    ) -> impl Future<Output = Result<CatalogEntry, CatalogError>> + Send;
}

/// [`CatalogClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    collection_url: String,
}

impl HttpCatalogClient {
    pub fn new(collection_url: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_timeout(collection_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        collection_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::connection)?;
        let collection_url = collection_url.into().trim_end_matches('/').to_owned();
        Ok(Self {
            http,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn entry_url(&self, id: EntryId) -> String {
        format!("{}/{id}", self.collection_url)
    }

    async fn get_text(&self, url: &str) -> Result<(reqwest::StatusCode, String), CatalogError> {
        tracing::debug!(url, "catalog request");
        let response = self.http.get(url).send().await.map_err(|err| {
            tracing::warn!(url, error = %err, "catalog request failed");
            CatalogError::connection(err)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(CatalogError::connection)?;
        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "catalog response");
        Ok((status, body))
    }
}

impl CatalogClient for HttpCatalogClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let (status, body) = self.get_text(&self.collection_url).await?;
        if !status.is_success() {
            return Err(CatalogError::connection(format!("HTTP {status}")));
        }
        decode_catalog(&body)
    }

    async fn fetch_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        let url = self.entry_url(id);
        let (status, body) = self.get_text(&url).await?;
        decode_entry(id, status.as_u16(), &body)
    }
}

/// Decodes a collection body: a JSON array of entry records.
pub fn decode_catalog(body: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    serde_json::from_str(body).map_err(CatalogError::malformed)
}

/// Decodes a single-entry response, mapping error markers and 404s to [`CatalogError::NotFound`].
pub fn decode_entry(id: EntryId, status: u16, body: &str) -> Result<CatalogEntry, CatalogError> {
    let value: Option<Value> = serde_json::from_str(body).ok();

    if let Some(message) = value.as_ref().and_then(error_marker) {
        return Err(CatalogError::NotFound { id, message });
    }
    if status == 404 {
        return Err(CatalogError::NotFound {
            id,
            message: "HTTP 404".to_owned(),
        });
    }
    if !(200..300).contains(&status) {
        return Err(CatalogError::connection(format!("HTTP {status}")));
    }

    let Some(value) = value else {
        return Err(CatalogError::malformed("entry body is not JSON"));
    };
    serde_json::from_value(value).map_err(CatalogError::malformed)
}

fn error_marker(value: &Value) -> Option<String> {
    let marker = value.as_object()?.get("error")?;
    Some(match marker {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}

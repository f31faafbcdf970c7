//! Client for the Unstructured partition API.
//!
//! Documents are posted as multipart `files` to
//! `{base_url}/general/v0/general`; the service returns a JSON array of
//! elements. Table elements carry their structure as HTML in
//! `metadata.text_as_html`.

use std::time::Duration;

use reqwest::{Client, header, multipart};
use serde::Deserialize;
use sentinel_core::document::{
    DocumentPartitioner, Element, ElementKind, PartitionError, SourceDocument,
};
use tracing::{debug, warn};

use crate::error::PartitionerConfigError;
use crate::html;

/// Partition endpoint path.
pub const PARTITION_PATH: &str = "/general/v0/general";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "unstructured-api-key";

/// Longest upstream error body kept in error messages.
const MAX_ERROR_BODY: usize = 500;

/// Unstructured partition API client.
#[derive(Debug, Clone)]
pub struct UnstructuredClient {
    client: Client,
    endpoint: String,
    strategy: String,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    text_as_html: Option<String>,
    #[serde(default)]
    page_number: Option<u32>,
}

impl UnstructuredClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        strategy: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PartitionerConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(PartitionerConfigError::MissingUrl);
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let mut value = header::HeaderValue::from_str(key)
                .map_err(|_| PartitionerConfigError::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| PartitionerConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{base_url}{PARTITION_PATH}"),
            strategy: strategy.into(),
        })
    }

    /// Full partition endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(&self, document: &SourceDocument) -> multipart::Form {
        multipart::Form::new()
            .part("files", file_part(document))
            .text("strategy", self.strategy.clone())
            .text("pdf_infer_table_structure", "true")
            .text("skip_infer_table_types", "[]")
    }
}

impl DocumentPartitioner for UnstructuredClient {
    async fn partition(&self, document: &SourceDocument) -> Result<Vec<Element>, PartitionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(self.form(document))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PartitionError::transport("request timed out")
                } else {
                    PartitionError::transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
            warn!(
                filename = %document.filename,
                status = status.as_u16(),
                body = %message,
                "Partition service rejected document"
            );
            return Err(PartitionError::upstream(status.as_u16(), message));
        }

        let raw: Vec<RawElement> = response.json().await.map_err(|e| {
            PartitionError::upstream(status.as_u16(), format!("invalid response body: {e}"))
        })?;

        let elements: Vec<Element> = raw.into_iter().map(into_element).collect();
        debug!(
            filename = %document.filename,
            elements = elements.len(),
            tables = elements.iter().filter(|e| e.is_table()).count(),
            "Partitioned document remotely"
        );
        Ok(elements)
    }
}

fn file_part(document: &SourceDocument) -> multipart::Part {
    let part = || multipart::Part::bytes(document.bytes.to_vec()).file_name(document.filename.clone());
    document
        .content_type
        .as_deref()
        .and_then(|mime| part().mime_str(mime).ok())
        .unwrap_or_else(part)
}

fn into_element(raw: RawElement) -> Element {
    let kind = ElementKind::from_type_name(&raw.kind);
    let page = raw.metadata.page_number;

    if kind == ElementKind::Table {
        let table = raw.metadata.text_as_html.as_deref().and_then(html::parse_table);
        Element::table(raw.text, table, page)
    } else {
        Element::text(kind, raw.text, page)
    }
}

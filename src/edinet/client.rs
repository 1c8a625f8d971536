// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EDINET v2 API client

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

const API_BASE: &str = "https://api.edinet-fsa.go.jp/api/v2";
const PDF_BASE: &str = "https://disclosure2dl.edinet-fsa.go.jp/searchdocument/pdf";

/// PDFs downloaded concurrently per date
const MAX_PARALLEL_DOWNLOADS: usize = 4;

/// Errors from EDINET listing and download operations
#[derive(Debug, Error)]
pub enum EdinetError {
    /// HTTP transport failure
    #[error("EDINET request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("EDINET API error for {context}: status {status}")]
    ApiError {
        /// What was being fetched
        context: String,
        /// HTTP status code
        status: u16,
    },

    /// No subscription key configured
    #[error("No EDINET subscription key configured")]
    NoSubscriptionKey,

    /// Failed writing a downloaded filing to disk
    #[error("Failed to write filing: {0}")]
    Io(#[from] std::io::Error),
}

/// Metadata for one filing listed by the API
#[derive(Debug, Clone)]
pub struct FilingMeta {
    /// EDINET document ID (e.g. "S100TDDE")
    pub doc_id: String,
    /// Human-readable filing description
    pub description: String,
    /// EDINET code of the filer
    pub edinet_code: String,
}

/// Client for the EDINET v2 disclosure API
pub struct EdinetClient {
    client: Client,
    subscription_key: String,
    api_base: String,
    pdf_base: String,
}

impl EdinetClient {
    /// Create a new client
    pub fn new(subscription_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            subscription_key,
            api_base: API_BASE.to_string(),
            pdf_base: PDF_BASE.to_string(),
        }
    }

    /// Create a client from EDINET_SUBSCRIPTION_KEY
    pub fn from_env() -> Self {
        Self::new(std::env::var("EDINET_SUBSCRIPTION_KEY").unwrap_or_default())
    }

    /// Check whether a subscription key is configured
    pub fn is_available(&self) -> bool {
        !self.subscription_key.is_empty()
    }

    /// List filings published on a date
    ///
    /// # Arguments
    /// * `date` - Publication date to query
    /// * `edinet_code` - Restrict to one filer, or None for all
    pub async fn list_filings(
        &self,
        date: NaiveDate,
        edinet_code: Option<&str>,
    ) -> Result<Vec<FilingMeta>, EdinetError> {
        if self.subscription_key.is_empty() {
            return Err(EdinetError::NoSubscriptionKey);
        }

        let date_str = date.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(format!("{}/documents.json", self.api_base))
            .query(&[
                ("date", date_str.as_str()),
                ("type", "2"),
                ("Subscription-Key", self.subscription_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EdinetError::ApiError {
                context: format!("documents on {}", date_str),
                status: status.as_u16(),
            });
        }

        let data: DocumentsResponse = response.json().await?;
        if data.metadata.resultset.count == 0 {
            return Ok(Vec::new());
        }

        let filings = data
            .results
            .into_iter()
            .filter(|doc| {
                edinet_code
                    .map(|code| doc.edinet_code.as_deref() == Some(code))
                    .unwrap_or(true)
            })
            .filter_map(|doc| {
                Some(FilingMeta {
                    doc_id: doc.doc_id,
                    description: doc.doc_description.unwrap_or_default(),
                    edinet_code: doc.edinet_code?,
                })
            })
            .collect();

        Ok(filings)
    }

    /// Download one filing PDF
    pub async fn download_pdf(&self, doc_id: &str) -> Result<Vec<u8>, EdinetError> {
        let response = self
            .client
            .get(format!("{}/{}.pdf", self.pdf_base, doc_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EdinetError::ApiError {
                context: format!("PDF {}", doc_id),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Download filings into `{out_dir}/{edinet_code}/{date}/`
    ///
    /// Downloads run with bounded parallelism. Failures on individual
    /// filings are logged and skipped so one bad document does not
    /// abort the batch; filesystem errors do abort. Returns the paths
    /// written.
    pub async fn download_filings(
        &self,
        filings: &[FilingMeta],
        date: NaiveDate,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, EdinetError> {
        let date_str = date.format("%Y-%m-%d").to_string();

        let results: Vec<Result<Option<PathBuf>, EdinetError>> = stream::iter(filings)
            .map(|filing| {
                let dir = out_dir.join(&filing.edinet_code).join(&date_str);
                async move { self.download_one(filing, dir).await }
            })
            .buffer_unordered(MAX_PARALLEL_DOWNLOADS)
            .collect()
            .await;

        let mut written = Vec::new();
        for result in results {
            if let Some(path) = result? {
                written.push(path);
            }
        }
        Ok(written)
    }

    async fn download_one(
        &self,
        filing: &FilingMeta,
        dir: PathBuf,
    ) -> Result<Option<PathBuf>, EdinetError> {
        let pdf = match self.download_pdf(&filing.doc_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(doc_id = %filing.doc_id, error = %e, "Skipping filing download");
                return Ok(None);
            }
        };

        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(format!("{}.pdf", sanitize_description(&filing.description)));
        tokio::fs::write(&path, &pdf).await?;
        info!(doc_id = %filing.doc_id, path = %path.display(), "Downloaded filing");
        Ok(Some(path))
    }
}

/// Inclusive date range iterator
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Make a filing description safe to use as a file name
fn sanitize_description(description: &str) -> String {
    let cleaned: String = description
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "filing".to_string()
    } else {
        cleaned
    }
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    metadata: Metadata,
    #[serde(default)]
    results: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    resultset: ResultSet,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    #[serde(rename = "docID")]
    doc_id: String,
    #[serde(rename = "docDescription")]
    doc_description: Option<String>,
    #[serde(rename = "edinetCode")]
    edinet_code: Option<String>,
}

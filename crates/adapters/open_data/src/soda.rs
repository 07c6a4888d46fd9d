//! Socrata (SODA) dataset client.

use std::sync::Arc;

use reqwest::Client;

use casestats_app::ports::CaseSource;
use casestats_domain::case::CaseRecord;
use casestats_domain::error::CaseStatsError;

use crate::config::SourceConfig;
use crate::error::OpenDataError;

/// Downloads case rows from a SODA JSON endpoint.
pub struct SodaCaseSource {
    client: Client,
    url: String,
    limit: u32,
}

impl SodaCaseSource {
    /// Build a client for `config.url` with `config.timeout()`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenDataError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self, OpenDataError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(OpenDataError::Client)?;
        Ok(Self {
            client,
            url: config.url.clone(),
            limit: config.limit,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn download(&self) -> Result<Vec<CaseRecord>, OpenDataError> {
        let request_error = |source| OpenDataError::Request {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .query(&[("$limit", self.limit)])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenDataError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(request_error)
    }
}

impl CaseSource for SodaCaseSource {
    async fn fetch_cases(&self) -> Result<Arc<[CaseRecord]>, CaseStatsError> {
        tracing::info!(url = %self.url, limit = self.limit, "downloading case rows");
        match self.download().await {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "case rows downloaded");
                Ok(rows.into())
            }
            Err(err) => {
                tracing::warn!(error = %err, "case download failed");
                Err(err.into())
            }
        }
    }
}

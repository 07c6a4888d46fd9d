//! Case rows from a local JSON export.

use std::path::PathBuf;
use std::sync::Arc;

use casestats_app::ports::CaseSource;
use casestats_domain::case::CaseRecord;
use casestats_domain::error::CaseStatsError;

use crate::error::OpenDataError;

/// Reads a JSON array of case rows from disk on every fetch.
///
/// Wrap it in a cache when the file is large.
pub struct FileCaseSource {
    path: PathBuf,
}

impl FileCaseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<CaseRecord>, OpenDataError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| OpenDataError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| OpenDataError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl CaseSource for FileCaseSource {
    async fn fetch_cases(&self) -> Result<Arc<[CaseRecord]>, CaseStatsError> {
        let rows = self.load().await?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "loaded case rows");
        Ok(rows.into())
    }
}

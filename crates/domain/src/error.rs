//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CaseStatsError`] via `From`.

/// Top-level error for casestats use-cases.
#[derive(Debug, thiserror::Error)]
pub enum CaseStatsError {
    /// The case source (upstream portal, file, …) could not deliver rows.
    #[error("case source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

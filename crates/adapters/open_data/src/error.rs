//! Case source adapter error types.

use std::path::PathBuf;

use casestats_domain::error::CaseStatsError;

/// Errors raised while loading case rows.
#[derive(Debug, thiserror::Error)]
pub enum OpenDataError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived, or the body was unreadable.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The portal answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// The export file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file is not a JSON array of case rows.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<OpenDataError> for CaseStatsError {
    fn from(err: OpenDataError) -> Self {
        Self::Source(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn should_display_status_error() {
        let err = OpenDataError::Status {
            url: "https://example.org/cases.json".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "https://example.org/cases.json answered with status 503"
        );
    }

    #[test]
    fn should_convert_into_source_error() {
        let err = OpenDataError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let domain: CaseStatsError = err.into();

        assert!(matches!(domain, CaseStatsError::Source(_)));
        let inner = domain.source().unwrap();
        assert_eq!(inner.to_string(), "failed to read missing.json");
        assert_eq!(inner.source().unwrap().to_string(), "no such file");
    }
}

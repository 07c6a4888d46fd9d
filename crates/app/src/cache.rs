//! Time-bounded cache in front of a [`CaseSource`].
//!
//! The upstream portal returns tens of thousands of rows per call; every
//! filter change in the browser would otherwise re-download all of them.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use casestats_domain::case::CaseRecord;
use casestats_domain::error::CaseStatsError;

use crate::ports::CaseSource;

struct Snapshot {
    fetched_at: Instant,
    rows: Arc<[CaseRecord]>,
}

/// Outcome of the last refresh that failed.
struct Failure {
    at: Instant,
    error: Arc<CaseStatsError>,
}

#[derive(Default)]
struct State {
    snapshot: Option<Snapshot>,
    failure: Option<Failure>,
}

/// A refresh failure handed to every caller that was waiting on it.
#[derive(Debug)]
struct SharedFailure(Arc<CaseStatsError>);

impl fmt::Display for SharedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for SharedFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl SharedFailure {
    fn wrap(error: &Arc<CaseStatsError>) -> CaseStatsError {
        CaseStatsError::Source(Box::new(Self(Arc::clone(error))))
    }
}

/// Wraps a [`CaseSource`] and reuses its last successful result for `ttl`.
///
/// Concurrent callers that find the snapshot stale wait on the same lock,
/// so only one refresh reaches the inner source. When that refresh fails,
/// the callers that queued behind it get the same error instead of retrying
/// one after another; a later call tries the source again. A zero `ttl`
/// disables caching entirely.
pub struct CachedCaseSource<S> {
    inner: S,
    ttl: Duration,
    state: Mutex<State>,
}

impl<S> CachedCaseSource<S> {
    /// Wrap `inner`, keeping results for `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            state: Mutex::new(State::default()),
        }
    }
}

impl<S: CaseSource + Sync> CaseSource for CachedCaseSource<S> {
    fn fetch_cases(&self) -> impl Future<Output = Result<Arc<[CaseRecord]>, CaseStatsError>> + Send {
        async move {
            if self.ttl.is_zero() {
                return self.inner.fetch_cases().await;
            }

            let waiting_since = Instant::now();
            let mut state = self.state.lock().await;
            if let Some(snapshot) = state.snapshot.as_ref()
                && snapshot.fetched_at.elapsed() < self.ttl
            {
                tracing::debug!(rows = snapshot.rows.len(), "serving cached case rows");
                return Ok(Arc::clone(&snapshot.rows));
            }
            if let Some(failure) = state.failure.as_ref()
                && failure.at > waiting_since
            {
                tracing::debug!("sharing failure of the refresh this call waited on");
                return Err(SharedFailure::wrap(&failure.error));
            }

            match self.inner.fetch_cases().await {
                Ok(rows) => {
                    state.failure = None;
                    state.snapshot = Some(Snapshot {
                        fetched_at: Instant::now(),
                        rows: Arc::clone(&rows),
                    });
                    Ok(rows)
                }
                Err(error) => {
                    let error = Arc::new(error);
                    state.failure = Some(Failure {
                        at: Instant::now(),
                        error: Arc::clone(&error),
                    });
                    Err(SharedFailure::wrap(&error))
                }
            }
        }
    }
}

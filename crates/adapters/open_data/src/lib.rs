//! # casestats-adapter-open-data
//!
//! Driven adapters implementing [`CaseSource`](casestats_app::ports::CaseSource).
//!
//! ## Sources
//! - [`SodaCaseSource`]: `GET <url>?$limit=<n>` against a Socrata (SODA)
//!   dataset endpoint such as `datos.gov.co`.
//! - [`FileCaseSource`]: a JSON array of rows read from disk, for offline
//!   use and tests.
//!
//! ## Dependency rule
//! Depends on `casestats-app` (for the port trait) and `casestats-domain`
//! (for [`CaseRecord`](casestats_domain::case::CaseRecord)). Never leaks
//! reqwest types past [`OpenDataError`].

pub mod config;
pub mod error;
pub mod file;
pub mod soda;

pub use config::SourceConfig;
pub use error::OpenDataError;
pub use file::FileCaseSource;
pub use soda::SodaCaseSource;

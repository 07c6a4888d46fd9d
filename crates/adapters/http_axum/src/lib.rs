//! # casestats-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve `GET /api/data`, the aggregated dashboard record, filtered by
//!   the `gender`, `department` and `city` query parameters
//! - Serve the compiled browser dashboard from a static directory, falling
//!   back to its `index.html`
//! - Map application errors into JSON error responses
//!
//! ## Dependency rule
//! Depends on `casestats-app` (for the port trait and services) and
//! `casestats-domain` (for request/response types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

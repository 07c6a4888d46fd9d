//! # casestats-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`CaseSource` port** that source adapters implement
//! - Aggregate case rows into a [`DashboardData`](casestats_domain::dashboard::DashboardData)
//!   record (`summary`)
//! - Expose the dashboard use-case (`services::dashboard_service`)
//! - Provide in-process infrastructure that needs no IO (`cache`)
//!
//! ## Dependency rule
//! Depends on `casestats-domain` only (plus `tokio::sync` for the cache lock).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod cache;
pub mod ports;
pub mod services;
pub mod summary;

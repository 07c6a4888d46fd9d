//! # casestats-domain
//!
//! Pure domain model for the case-statistics dashboard.
//!
//! ## Responsibilities
//! - Define **case rows** as delivered by the upstream open-data portal
//! - Define **filters** narrowing a dashboard query, and their query-string form
//! - Define the **dashboard record** exchanged between server and browser
//! - Define **age brackets** and the ordered **counts** mapping
//! - Error conventions shared across the workspace
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, `view`, adapters, or IO crates.

pub mod error;

pub mod age;
pub mod case;
pub mod counts;
pub mod dashboard;
pub mod filter;

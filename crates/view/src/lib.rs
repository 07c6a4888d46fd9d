//! # casestats-view
//!
//! Browser-side view model for the case-statistics dashboard, kept free of
//! any DOM or UI framework so it can be tested natively.
//!
//! ## Responsibilities
//! - **Theme controller** (`theme`): resolve the initial theme, toggle and
//!   persist it, expose the active chart palette
//! - **Chart renderer** (`chart`, `registry`): describe the five charts and own
//!   exactly one live instance per slot
//! - **Data fetcher** (`fetcher`): build the request, guard the trigger
//!   button, discard stale responses, and push results into the view
//!
//! ## Dependency rule
//! Depends on `casestats-domain` only. Everything that touches the browser
//! sits behind the traits defined here (`ThemeStore`, `ThemeSurface`,
//! `ChartCanvas`, `CanvasLookup`, `DashboardApi`, `DashboardView`,
//! `TriggerButton`) and is implemented by the Leptos adapter.

pub mod chart;
pub mod color;
pub mod fetcher;
pub mod format;
pub mod registry;
pub mod theme;

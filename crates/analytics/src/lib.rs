//! # Return/Volatility Analytics Engine
//!
//! This crate holds the computational core of the screener: forward-return
//! shifting, per-instrument trailing windows, cross-sectional aggregation,
//! quantile thresholds and tier-based selection.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function here is a pure function of its
//!   explicit inputs. The immutable `BarStore` is passed in by the caller;
//!   nothing is read from globals, nothing is written anywhere. This makes
//!   the engine trivially cacheable and easy to test.
//!
//! ## Public API
//!
//! - `compute_forward_returns` / `filter_window`: the per-instrument shift
//!   and trailing-window steps.
//! - `aggregate` / `aggregate_by_industry`: instrument and industry rollups.
//! - `compute_thresholds` / `compute_summary`: quantile cut points and the
//!   scalar summary bundle.
//! - `select`: tier filtering and the tier-dependent ranking.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod error;
pub mod returns;
pub mod select;
pub mod thresholds;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{aggregate, aggregate_by_industry};
pub use error::AnalyticsError;
pub use returns::{
    MAX_RETURN_PERIOD_MONTHS, TRADING_DAYS_PER_MONTH, compute_forward_returns, filter_window,
};
pub use select::select;
pub use thresholds::{SummaryStats, Thresholds, compute_summary, compute_thresholds};

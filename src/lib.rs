//! Client-side data layer for the filing sentiment report viewer.
//!
//! Three pieces, leaf first:
//! - a typed async HTTP client for the report service ([`HttpApi`], behind
//!   the [`SentimentApi`] trait, with a [`MockApi`] for tests)
//! - pure validation/derivation helpers ([`sentiment`])
//! - a session-scoped observable state store ([`ReportStore`]) that
//!   orchestrates fetches and exposes presentation-ready snapshots
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sentiment_report_client::{ApiConfig, ReportStore, Resource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(ReportStore::http(ApiConfig {
//!     base_url: "http://localhost:8000/api".into(),
//!     ..Default::default()
//! })?);
//!
//! store.fetch_tickers().await;
//! store.fetch_reports(Some("AAPL")).await;
//!
//! if let Some(error) = store.status(Resource::Reports).await.error {
//!     eprintln!("{}", error);
//! } else {
//!     println!("{} filings", store.reports().await.len());
//! }
//! # Ok(())
//! # }
//! ```

// Remote API trait and implementations
pub mod client;

// Error types
pub mod error;

// Pure validation/derivation helpers
pub mod sentiment;

// Observable state store
pub mod store;

// Wire types and configuration
pub mod types;

// Re-export client types
pub use client::{HttpApi, MockApi, SentimentApi};

// Re-export error types
pub use error::{Error, Result};

// Re-export derivation helpers
pub use sentiment::{
    dominant_sentiment, format_percent, is_complete_report, section_display_name,
    sentiment_distribution,
};

// Re-export store types
pub use store::{FetchStatus, ReportStore, Resource};

// Re-export data types
pub use types::{
    ApiConfig, Health, LabelCounts, LabelRatios, ReportDetail, ReportItem, ReportSummary,
    SectionDetail, SentenceSentiment, SentimentLabel, SummaryItem,
};

//! Remote API abstraction layer.
//!
//! Provides a trait-based interface over the report service so the store
//! can be driven by either the real HTTP client or the mock:
//! - `HttpApi` - reqwest client against the report service
//! - `MockApi` - in-memory implementation for testing

pub mod http;
pub mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Health, ReportDetail, ReportItem, SectionDetail, SentenceSentiment, SummaryItem,
};

/// One method per remote resource, happy path only.
///
/// Implementations perform a single fresh request per call: no retries and
/// no caching. Any non-2xx response or transport failure surfaces as a
/// normalized [`crate::Error`].
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// Probe service health and model availability.
    async fn health(&self) -> Result<Health>;

    /// List all known ticker symbols.
    async fn list_tickers(&self) -> Result<Vec<String>>;

    /// List known reports, optionally server-filtered by ticker.
    async fn list_reports(&self, ticker: Option<&str>) -> Result<Vec<ReportItem>>;

    /// Fetch the full analysis for one report.
    ///
    /// `force_analyze` is passed through as `analyze=true`; its server-side
    /// meaning is opaque to this layer.
    async fn report_detail(
        &self,
        ticker: &str,
        date: &str,
        force_analyze: bool,
    ) -> Result<ReportDetail>;

    /// Fetch the analyzed sentences of one report section.
    async fn section_detail(
        &self,
        ticker: &str,
        date: &str,
        section_id: &str,
    ) -> Result<SectionDetail>;

    /// List cross-report summary rows, optionally server-filtered by ticker.
    async fn list_summary(&self, ticker: Option<&str>) -> Result<Vec<SummaryItem>>;

    /// Analyze an ad-hoc piece of text.
    async fn analyze_text(&self, text: &str) -> Result<SentenceSentiment>;
}

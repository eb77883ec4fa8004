//! Observable report state store.
//!
//! `ReportStore` is the single state owner for the viewer: it orchestrates
//! API calls, commits results, and records failures. The view layer reads
//! snapshots and invokes actions; it never writes fields directly.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::{HttpApi, SentimentApi};
use crate::error::{Error, Result};
use crate::sentiment::{is_complete_report, sentiment_distribution};
use crate::types::{
    ApiConfig, LabelRatios, ReportDetail, ReportItem, SectionDetail, SummaryItem,
};

/// Logical resource targeted by a fetch action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tickers,
    Reports,
    ReportDetail,
    SectionDetail,
    Summary,
}

impl Resource {
    /// Human label used in error-message prefixes.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Tickers => "tickers",
            Resource::Reports => "reports",
            Resource::ReportDetail => "report detail",
            Resource::SectionDetail => "section detail",
            Resource::Summary => "summary",
        }
    }
}

/// Loading flag and last error for one resource.
///
/// Each resource gets its own pair so concurrent fetches of different
/// resources cannot clobber each other's visible state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct StoreState {
    tickers: Vec<String>,
    reports: Vec<ReportItem>,
    /// Derived from `reports`, rebuilt wholesale on every successful fetch.
    reports_by_ticker: HashMap<String, Vec<ReportItem>>,
    current_report: Option<ReportDetail>,
    current_section: Option<SectionDetail>,
    summary: Vec<SummaryItem>,
    status: HashMap<Resource, FetchStatus>,
    /// Aggregate mirror of the most recent failure, for views that render
    /// a single error line.
    last_error: Option<String>,
}

/// Session-scoped state owner for the report viewer.
///
/// Actions re-run the whole fetch-and-replace cycle each time they are
/// invoked and never let an error escape: failures are recorded into the
/// matching resource's [`FetchStatus`] while previously committed data
/// stays in place.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sentiment_report_client::{ApiConfig, ReportStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(ReportStore::http(ApiConfig::default())?);
///
/// store.fetch_reports(Some("AAPL")).await;
/// for (ticker, reports) in store.reports_by_ticker().await {
///     println!("{}: {} filings", ticker, reports.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ReportStore {
    api: Arc<dyn SentimentApi>,
    state: RwLock<StoreState>,
}

impl ReportStore {
    /// Create a store over any API implementation.
    pub fn new(api: Arc<dyn SentimentApi>) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Create a store over an HTTP client with the given configuration.
    pub fn http(config: ApiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpApi::new(config)?)))
    }

    // ==================== Actions ====================

    /// Fetch the known ticker symbols.
    pub async fn fetch_tickers(&self) {
        self.begin(Resource::Tickers).await;

        match self.api.list_tickers().await {
            Ok(tickers) => {
                debug!(count = tickers.len(), "fetched tickers");
                self.commit(Resource::Tickers, |state| state.tickers = tickers)
                    .await;
            }
            Err(err) => self.fail(Resource::Tickers, &err).await,
        }
    }

    /// Fetch the report listing, optionally filtered by ticker.
    ///
    /// On success the per-ticker grouping is rebuilt from the fresh
    /// sequence, preserving fetch order within each group.
    pub async fn fetch_reports(&self, ticker: Option<&str>) {
        self.begin(Resource::Reports).await;

        match self.api.list_reports(ticker).await {
            Ok(reports) => {
                debug!(count = reports.len(), ticker, "fetched reports");
                let mut by_ticker: HashMap<String, Vec<ReportItem>> = HashMap::new();
                for report in &reports {
                    by_ticker
                        .entry(report.ticker.clone())
                        .or_default()
                        .push(report.clone());
                }

                self.commit(Resource::Reports, |state| {
                    state.reports = reports;
                    state.reports_by_ticker = by_ticker;
                })
                .await;
            }
            Err(err) => self.fail(Resource::Reports, &err).await,
        }
    }

    /// Fetch one report's full analysis into `current_report`.
    ///
    /// The response is gated through the completeness check; an incomplete
    /// report is recorded as a failure and never committed.
    pub async fn fetch_report_detail(&self, ticker: &str, date: &str, force_analyze: bool) {
        self.begin(Resource::ReportDetail).await;

        match self.api.report_detail(ticker, date, force_analyze).await {
            Ok(report) if is_complete_report(&report) => {
                debug!(ticker, date, sections = report.sections.len(), "fetched report detail");
                self.commit(Resource::ReportDetail, |state| {
                    state.current_report = Some(report);
                })
                .await;
            }
            Ok(_) => {
                self.fail(Resource::ReportDetail, &Error::IncompleteReport)
                    .await;
            }
            Err(err) => self.fail(Resource::ReportDetail, &err).await,
        }
    }

    /// Fetch one section's analyzed sentences into `current_section`.
    pub async fn fetch_section_detail(&self, ticker: &str, date: &str, section_id: &str) {
        self.begin(Resource::SectionDetail).await;

        match self.api.section_detail(ticker, date, section_id).await {
            Ok(section) => {
                debug!(ticker, date, section_id, "fetched section detail");
                self.commit(Resource::SectionDetail, |state| {
                    state.current_section = Some(section);
                })
                .await;
            }
            Err(err) => self.fail(Resource::SectionDetail, &err).await,
        }
    }

    /// Fetch the cross-report summary rows, optionally filtered by ticker.
    pub async fn fetch_summary(&self, ticker: Option<&str>) {
        self.begin(Resource::Summary).await;

        match self.api.list_summary(ticker).await {
            Ok(summary) => {
                debug!(count = summary.len(), ticker, "fetched summary");
                self.commit(Resource::Summary, |state| state.summary = summary)
                    .await;
            }
            Err(err) => self.fail(Resource::Summary, &err).await,
        }
    }

    /// Drop the focused report. Performs no request.
    pub async fn clear_current_report(&self) {
        let mut state = self.state.write().await;
        state.current_report = None;
    }

    // ==================== Observation ====================

    pub async fn tickers(&self) -> Vec<String> {
        self.state.read().await.tickers.clone()
    }

    pub async fn reports(&self) -> Vec<ReportItem> {
        self.state.read().await.reports.clone()
    }

    /// Reports grouped by ticker, in original fetch order within each group.
    pub async fn reports_by_ticker(&self) -> HashMap<String, Vec<ReportItem>> {
        self.state.read().await.reports_by_ticker.clone()
    }

    /// Reports known for one ticker, in original fetch order.
    pub async fn reports_for(&self, ticker: &str) -> Vec<ReportItem> {
        self.state
            .read()
            .await
            .reports_by_ticker
            .get(ticker)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn current_report(&self) -> Option<ReportDetail> {
        self.state.read().await.current_report.clone()
    }

    pub async fn current_section(&self) -> Option<SectionDetail> {
        self.state.read().await.current_section.clone()
    }

    pub async fn summary(&self) -> Vec<SummaryItem> {
        self.state.read().await.summary.clone()
    }

    /// Per-label ratios of the focused report, for distribution charts.
    pub async fn current_sentiment_distribution(&self) -> Option<LabelRatios> {
        self.state
            .read()
            .await
            .current_report
            .as_ref()
            .map(sentiment_distribution)
    }

    /// Loading flag and last error for one resource.
    pub async fn status(&self, resource: Resource) -> FetchStatus {
        self.state
            .read()
            .await
            .status
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any fetch is currently in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.status.values().any(|s| s.loading)
    }

    /// Most recent failure message across all resources.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    // ==================== State transitions ====================

    /// Enter Loading for a resource: flag set, its error cleared.
    ///
    /// The write guard is held only for the transition, never across the
    /// network await, so a slow fetch cannot block observers.
    async fn begin(&self, resource: Resource) {
        let mut state = self.state.write().await;
        let status = state.status.entry(resource).or_default();
        status.loading = true;
        status.error = None;
        state.last_error = None;
    }

    /// Commit a successful fetch and leave Loading.
    async fn commit(&self, resource: Resource, apply: impl FnOnce(&mut StoreState)) {
        let mut state = self.state.write().await;
        apply(&mut state);
        state.status.entry(resource).or_default().loading = false;
    }

    /// Record a failure and leave Loading. Stale data stays untouched.
    async fn fail(&self, resource: Resource, err: &Error) {
        let message = format!("failed to fetch {}: {}", resource.label(), err.message());
        warn!(resource = resource.label(), error = %err, "fetch failed");

        let mut state = self.state.write().await;
        let status = state.status.entry(resource).or_default();
        status.loading = false;
        status.error = Some(message.clone());
        state.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockApi;
    use crate::types::{LabelCounts, ReportSummary, SentenceSentiment, SentimentLabel};

    fn item(ticker: &str, date: &str) -> ReportItem {
        ReportItem {
            ticker: ticker.to_string(),
            date: date.to_string(),
            sections: vec!["Item_1".to_string()],
        }
    }

    fn complete_report(ticker: &str, date: &str) -> ReportDetail {
        let mut sections = HashMap::new();
        sections.insert(
            "Item_1".to_string(),
            SectionDetail {
                stats: LabelCounts {
                    positive: 1,
                    ..Default::default()
                },
                proportions: Default::default(),
                sentences: vec![SentenceSentiment {
                    text: "Revenue grew.".to_string(),
                    label: SentimentLabel::Positive,
                    confidence: Default::default(),
                }],
            },
        );

        ReportDetail {
            ticker: ticker.to_string(),
            date: date.to_string(),
            summary: ReportSummary {
                positive_count: 1,
                positive_ratio: 1.0,
                ..Default::default()
            },
            sections,
        }
    }

    fn store_with(api: MockApi) -> (Arc<MockApi>, ReportStore) {
        let api = Arc::new(api);
        let store = ReportStore::new(api.clone());
        (api, store)
    }

    #[tokio::test]
    async fn fetch_tickers_commits_and_clears_loading() {
        let (_, store) = store_with(MockApi::new().with_tickers(vec!["AAPL".into()]));

        store.fetch_tickers().await;

        assert_eq!(store.tickers().await, vec!["AAPL"]);
        let status = store.status(Resource::Tickers).await;
        assert!(!status.loading);
        assert_eq!(status.error, None);
    }

    #[tokio::test]
    async fn fetch_reports_groups_by_ticker_in_order() {
        let (_, store) = store_with(MockApi::new().with_reports(vec![
            item("AAPL", "2022-01-01"),
            item("MSFT", "2022-06-01"),
            item("AAPL", "2023-01-01"),
        ]));

        store.fetch_reports(None).await;

        let grouped = store.reports_by_ticker().await;
        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped["AAPL"],
            vec![item("AAPL", "2022-01-01"), item("AAPL", "2023-01-01")]
        );
        assert_eq!(grouped["MSFT"], vec![item("MSFT", "2022-06-01")]);
    }

    #[tokio::test]
    async fn fetch_reports_rebuilds_grouping_wholesale() {
        let (api, store) = store_with(MockApi::new().with_reports(vec![
            item("AAPL", "2023-01-01"),
            item("MSFT", "2022-06-01"),
        ]));

        store.fetch_reports(None).await;
        assert!(store.reports_by_ticker().await.contains_key("MSFT"));

        // Server-side filter narrows the listing; the old group must go.
        store.fetch_reports(Some("AAPL")).await;

        let grouped = store.reports_by_ticker().await;
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["AAPL"], vec![item("AAPL", "2023-01-01")]);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_stale_data_and_records_prefixed_error() {
        let (api, store) = store_with(MockApi::new().with_tickers(vec!["AAPL".into()]));

        store.fetch_tickers().await;
        assert_eq!(store.tickers().await, vec!["AAPL"]);

        api.set_failing(true);
        store.fetch_tickers().await;

        // Stale-but-valid data stays visible.
        assert_eq!(store.tickers().await, vec!["AAPL"]);

        let status = store.status(Resource::Tickers).await;
        assert!(!status.loading);
        let error = status.error.unwrap();
        assert!(error.starts_with("failed to fetch tickers: "));
        assert_eq!(store.last_error().await, Some(error));
    }

    #[tokio::test]
    async fn incomplete_report_detail_is_not_committed() {
        let (_, store) = store_with(
            // No sentences anywhere: fails the completeness gate.
            MockApi::new().with_report_detail(ReportDetail {
                ticker: "AAPL".to_string(),
                date: "2023-01-01".to_string(),
                summary: Default::default(),
                sections: HashMap::from([("Item_1".to_string(), SectionDetail::default())]),
            }),
        );

        store.fetch_report_detail("AAPL", "2023-01-01", false).await;

        assert_eq!(store.current_report().await, None);
        let status = store.status(Resource::ReportDetail).await;
        assert_eq!(
            status.error.as_deref(),
            Some("failed to fetch report detail: report sections empty")
        );
    }

    #[tokio::test]
    async fn committed_report_detail_is_always_complete() {
        let (_, store) =
            store_with(MockApi::new().with_report_detail(complete_report("AAPL", "2023-01-01")));

        store.fetch_report_detail("AAPL", "2023-01-01", false).await;

        let report = store.current_report().await.unwrap();
        assert!(is_complete_report(&report));
        assert_eq!(report.ticker, "AAPL");
    }

    #[tokio::test]
    async fn incomplete_detail_leaves_previous_report_in_place() {
        let (api, store) =
            store_with(MockApi::new().with_report_detail(complete_report("AAPL", "2023-01-01")));

        store.fetch_report_detail("AAPL", "2023-01-01", false).await;
        assert!(store.current_report().await.is_some());

        api.set_failing(true);
        store.fetch_report_detail("AAPL", "2024-01-01", false).await;

        // The earlier report is still displayed alongside the new error.
        let report = store.current_report().await.unwrap();
        assert_eq!(report.date, "2023-01-01");
        assert!(store.status(Resource::ReportDetail).await.error.is_some());
    }

    #[tokio::test]
    async fn clear_current_report_needs_no_api_call() {
        let (api, store) =
            store_with(MockApi::new().with_report_detail(complete_report("AAPL", "2023-01-01")));

        store.fetch_report_detail("AAPL", "2023-01-01", false).await;
        let calls_before = api.call_count();

        store.clear_current_report().await;

        assert_eq!(store.current_report().await, None);
        assert_eq!(api.call_count(), calls_before);

        // Idempotent on an already-empty store.
        store.clear_current_report().await;
        assert_eq!(store.current_report().await, None);
        assert_eq!(api.call_count(), calls_before);
    }

    #[tokio::test]
    async fn resource_statuses_are_independent() {
        let (api, store) = store_with(MockApi::new().with_tickers(vec!["AAPL".into()]));

        api.set_failing(true);
        store.fetch_summary(None).await;
        api.set_failing(false);
        store.fetch_tickers().await;

        // The summary failure survives the tickers success.
        assert!(store.status(Resource::Summary).await.error.is_some());
        assert_eq!(store.status(Resource::Tickers).await.error, None);
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn refetch_clears_previous_error() {
        let (api, store) = store_with(MockApi::new().with_tickers(vec!["AAPL".into()]));

        api.set_failing(true);
        store.fetch_tickers().await;
        assert!(store.status(Resource::Tickers).await.error.is_some());

        api.set_failing(false);
        store.fetch_tickers().await;

        assert_eq!(store.status(Resource::Tickers).await.error, None);
        assert_eq!(store.tickers().await, vec!["AAPL"]);
    }

    #[tokio::test]
    async fn distribution_follows_focused_report() {
        let mut report = complete_report("AAPL", "2023-01-01");
        report.summary.positive_ratio = 0.7;
        report.summary.neutral_ratio = 0.2;
        report.summary.negative_ratio = 0.1;

        let (_, store) = store_with(MockApi::new().with_report_detail(report));

        assert_eq!(store.current_sentiment_distribution().await, None);

        store.fetch_report_detail("AAPL", "2023-01-01", false).await;

        let dist = store.current_sentiment_distribution().await.unwrap();
        assert_eq!(dist.positive, 0.7);

        store.clear_current_report().await;
        assert_eq!(store.current_sentiment_distribution().await, None);
    }
}

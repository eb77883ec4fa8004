//! Mock API implementation for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::SentimentApi;
use crate::error::{Error, Result};
use crate::types::{
    Health, ReportDetail, ReportItem, SectionDetail, SentenceSentiment, SentimentLabel,
    SummaryItem,
};

/// In-memory API for testing.
///
/// Serves canned payloads, counts calls, and can be switched into a
/// failing state to exercise error paths without a network.
pub struct MockApi {
    tickers: Vec<String>,
    reports: Vec<ReportItem>,
    report: ReportDetail,
    section: SectionDetail,
    summary: Vec<SummaryItem>,
    failing: AtomicBool,
    fail_message: String,
    call_count: AtomicU32,
}

impl MockApi {
    /// Create a mock with empty payloads.
    pub fn new() -> Self {
        Self {
            tickers: Vec::new(),
            reports: Vec::new(),
            report: ReportDetail::default(),
            section: SectionDetail::default(),
            summary: Vec::new(),
            failing: AtomicBool::new(false),
            fail_message: "mock api failure".to_string(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the canned ticker list.
    pub fn with_tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = tickers;
        self
    }

    /// Set the canned report listing.
    pub fn with_reports(mut self, reports: Vec<ReportItem>) -> Self {
        self.reports = reports;
        self
    }

    /// Set the canned report detail.
    pub fn with_report_detail(mut self, report: ReportDetail) -> Self {
        self.report = report;
        self
    }

    /// Set the canned section detail.
    pub fn with_section_detail(mut self, section: SectionDetail) -> Self {
        self.section = section;
        self
    }

    /// Set the canned summary rows.
    pub fn with_summary(mut self, summary: Vec<SummaryItem>) -> Self {
        self.summary = summary;
        self
    }

    /// Make every call fail with the given transport message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        Self {
            fail_message: message.into(),
            ..self
        }
    }

    /// Switch the failing state on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of API calls made through this mock.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Transport(self.fail_message.clone()));
        }
        Ok(())
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentApi for MockApi {
    async fn health(&self) -> Result<Health> {
        self.record_call()?;
        Ok(Health {
            status: "ok".to_string(),
            model_loaded: true,
        })
    }

    async fn list_tickers(&self) -> Result<Vec<String>> {
        self.record_call()?;
        Ok(self.tickers.clone())
    }

    async fn list_reports(&self, ticker: Option<&str>) -> Result<Vec<ReportItem>> {
        self.record_call()?;
        // The real service filters server-side; mirror that here.
        Ok(match ticker {
            Some(ticker) => self
                .reports
                .iter()
                .filter(|r| r.ticker == ticker)
                .cloned()
                .collect(),
            None => self.reports.clone(),
        })
    }

    async fn report_detail(
        &self,
        _ticker: &str,
        _date: &str,
        _force_analyze: bool,
    ) -> Result<ReportDetail> {
        self.record_call()?;
        Ok(self.report.clone())
    }

    async fn section_detail(
        &self,
        _ticker: &str,
        _date: &str,
        _section_id: &str,
    ) -> Result<SectionDetail> {
        self.record_call()?;
        Ok(self.section.clone())
    }

    async fn list_summary(&self, ticker: Option<&str>) -> Result<Vec<SummaryItem>> {
        self.record_call()?;
        Ok(match ticker {
            Some(ticker) => self
                .summary
                .iter()
                .filter(|s| s.ticker == ticker)
                .cloned()
                .collect(),
            None => self.summary.clone(),
        })
    }

    async fn analyze_text(&self, text: &str) -> Result<SentenceSentiment> {
        self.record_call()?;
        Ok(SentenceSentiment {
            text: text.to_string(),
            label: SentimentLabel::Neutral,
            confidence: Default::default(),
        })
    }
}

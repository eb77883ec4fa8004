//! HTTP client for the sentiment report service.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::SentimentApi;
use crate::error::{Error, Result};
use crate::types::{
    ApiConfig, Health, ReportDetail, ReportItem, ReportsResponse, SectionDetail,
    SentenceSentiment, SummaryItem, SummaryResponse, TickersResponse,
};

/// HTTP client for the sentiment report service
///
/// # Example
///
/// ```rust,no_run
/// use sentiment_report_client::{ApiConfig, HttpApi, SentimentApi};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = HttpApi::new(ApiConfig {
///     base_url: "http://localhost:8000/api".into(),
///     ..Default::default()
/// })?;
///
/// let tickers = api.list_tickers().await?;
/// let reports = api.list_reports(Some("AAPL")).await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpApi {
    config: ApiConfig,
    client: Client,
}

impl HttpApi {
    /// Create a new client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a client against the default local service.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ApiConfig::default())
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "report api request");
        let response = self.client.get(url).send().await?;
        self.handle_response(url, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = detail_message(&body).unwrap_or_else(|| status_message(status));
            warn!(%url, status = status.as_u16(), %message, "report api request failed");
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json().await?;
        Ok(parsed)
    }
}

/// Structured error text from a failure response body, when present.
///
/// The service reports failures as `{"detail": "..."}`.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}

/// Fallback "<status code> - <status text>" message.
fn status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} - {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[async_trait]
impl SentimentApi for HttpApi {
    async fn health(&self) -> Result<Health> {
        let url = format!("{}/health", self.config.base_url);
        self.get_json(&url).await
    }

    async fn list_tickers(&self) -> Result<Vec<String>> {
        let url = format!("{}/tickers", self.config.base_url);
        let response: TickersResponse = self.get_json(&url).await?;
        Ok(response.tickers)
    }

    async fn list_reports(&self, ticker: Option<&str>) -> Result<Vec<ReportItem>> {
        let mut url = format!("{}/reports", self.config.base_url);
        if let Some(ticker) = ticker {
            url.push_str("?ticker=");
            url.push_str(&urlencoding::encode(ticker));
        }

        let response: ReportsResponse = self.get_json(&url).await?;
        Ok(response.reports)
    }

    async fn report_detail(
        &self,
        ticker: &str,
        date: &str,
        force_analyze: bool,
    ) -> Result<ReportDetail> {
        let mut url = format!(
            "{}/report/{}/{}",
            self.config.base_url,
            urlencoding::encode(ticker),
            urlencoding::encode(date)
        );
        if force_analyze {
            url.push_str("?analyze=true");
        }

        self.get_json(&url).await
    }

    async fn section_detail(
        &self,
        ticker: &str,
        date: &str,
        section_id: &str,
    ) -> Result<SectionDetail> {
        let url = format!(
            "{}/report/{}/{}/section/{}",
            self.config.base_url,
            urlencoding::encode(ticker),
            urlencoding::encode(date),
            urlencoding::encode(section_id)
        );

        self.get_json(&url).await
    }

    async fn list_summary(&self, ticker: Option<&str>) -> Result<Vec<SummaryItem>> {
        let mut url = format!("{}/summary", self.config.base_url);
        if let Some(ticker) = ticker {
            url.push_str("?ticker=");
            url.push_str(&urlencoding::encode(ticker));
        }

        let response: SummaryResponse = self.get_json(&url).await?;
        Ok(response.summary)
    }

    async fn analyze_text(&self, text: &str) -> Result<SentenceSentiment> {
        let url = format!(
            "{}/analyze-text?text={}",
            self.config.base_url,
            urlencoding::encode(text)
        );

        self.get_json(&url).await
    }
}

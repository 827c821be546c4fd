use std::collections::BTreeMap;
use std::time::Duration;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::app::config::Config;
use crate::esg::data::data::{
  ChartEnvelope, ChartQuery, ProviderHeaderData, QuoteSummaryEnvelope, QuoteSummaryQuery,
};
use crate::esg::data::models::{CompanyProfile, CompanySnapshot, EsgScores, PricePoint, Ticker};
use crate::esg::error::DashboardError;
use crate::esg::tools::returns::price_point;

/// Numeric entries of the `esgScores` block that describe the record rather
/// than the company.
const NON_FACTOR_KEYS: [&str; 3] = ["maxAge", "ratingYear", "ratingMonth"];

/// Finance data provider seam, so the pipeline can run against fakes.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
  /// Company metadata and ESG scores. Any failure is `DataUnavailable`.
  async fn company(&self, ticker: &Ticker) -> Result<CompanySnapshot, DashboardError>;

  /// Trailing year of daily closes, oldest first.
  async fn price_history(&self, ticker: &Ticker) -> Result<Vec<PricePoint>, DashboardError>;
}

pub struct YahooFinance {
  base_url: String,
  cookie_url: String,
  client: Client,
  crumb: Mutex<Option<String>>,
}

impl YahooFinance {
  pub fn new(config: &Config) -> anyhow::Result<Self> {
    let client: Client = Client::builder()
      .cookie_store(true)
      .default_headers(ProviderHeaderData::new().to_header_map())
      .timeout(Duration::from_secs(config.http_timeout_secs))
      .build()?;

    Ok(YahooFinance {
      base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
      cookie_url: config.yahoo_cookie_url.clone(),
      client,
      crumb: Mutex::new(None),
    })
  }

  /// Cached crumb, fetched on first use. A rejected or malformed crumb is
  /// never cached, so the next lookup asks again.
  async fn crumb(&self) -> Result<String, String> {
    let mut cached = self.crumb.lock().await;
    if let Some(crumb) = cached.as_ref() {
      return Ok(crumb.clone());
    }

    let crumb: String = self.fetch_crumb().await?;
    *cached = Some(crumb.clone());
    Ok(crumb)
  }

  async fn fetch_crumb(&self) -> Result<String, String> {
    // The cookie endpoint answers 404 but still sets the session cookie.
    if let Err(e) = self.client.get(&self.cookie_url).send().await {
      log::warn!("Cookie priming request to {} failed: {}", self.cookie_url, e);
    }

    let url: String = format!("{}/v1/test/getcrumb", self.base_url);
    let response: Response = self.client.get(&url).send().await
      .and_then(|r| r.error_for_status())
      .map_err(|e| e.to_string())?;
    let crumb: String = response.text().await.map_err(|e| e.to_string())?.trim().to_string();

    if !valid_crumb(&crumb) {
      log::warn!("Yahoo answered getcrumb with {:?}", crumb);
      return Err("provider returned an invalid crumb".to_string());
    }
    log::info!("Obtained Yahoo crumb");
    Ok(crumb)
  }

  async fn forget_crumb(&self) {
    *self.crumb.lock().await = None;
  }

  async fn quote_summary(&self, ticker: &Ticker) -> Result<Response, DashboardError> {
    let crumb: String = self.crumb().await.map_err(|e| DashboardError::data_unavailable(ticker.as_str(), e))?;

    let url: String = format!("{}/v10/finance/quoteSummary/{}", self.base_url, ticker);
    let query = QuoteSummaryQuery { modules: "price,esgScores".to_string(), crumb };
    log::debug!("Fetching company summary from {}", url);

    self.client.get(&url).query(&query).send().await
      .map_err(|e| DashboardError::data_unavailable(ticker.as_str(), e))
  }
}

/// Yahoo hands out an HTML consent page or an empty body instead of a crumb
/// when the session cookie was not accepted.
pub fn valid_crumb(crumb: &str) -> bool {
  !crumb.is_empty() && !crumb.contains('<')
}

#[async_trait]
impl MarketDataSource for YahooFinance {
  async fn company(&self, ticker: &Ticker) -> Result<CompanySnapshot, DashboardError> {
    let mut response: Response = self.quote_summary(ticker).await?;

    // Crumbs expire with the session; refresh once and retry.
    if response.status() == StatusCode::UNAUTHORIZED {
      log::warn!("Yahoo rejected the crumb for {}, refreshing it", ticker);
      self.forget_crumb().await;
      response = self.quote_summary(ticker).await?;
    }

    // Yahoo reports unknown symbols as a 404 carrying a JSON error body.
    let status = response.status();
    let envelope: QuoteSummaryEnvelope = match response.json().await {
      Ok(envelope) => envelope,
      Err(e) if status.is_success() => return Err(DashboardError::data_unavailable(ticker.as_str(), e)),
      Err(_) => return Err(DashboardError::data_unavailable(ticker.as_str(), format!("provider answered {}", status))),
    };

    snapshot_from_summary(ticker, envelope)
  }

  async fn price_history(&self, ticker: &Ticker) -> Result<Vec<PricePoint>, DashboardError> {
    let url: String = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
    log::debug!("Fetching price history from {}", url);

    let response: Response = self.client.get(&url).query(&ChartQuery::one_year_daily()).send().await
      .map_err(|e| DashboardError::PriceHistoryUnavailable(e.to_string()))?;

    let status = response.status();
    let envelope: ChartEnvelope = match response.json().await {
      Ok(envelope) => envelope,
      Err(e) if status.is_success() => return Err(DashboardError::PriceHistoryUnavailable(e.to_string())),
      Err(_) => return Err(DashboardError::PriceHistoryUnavailable(format!("provider answered {}", status))),
    };

    history_from_chart(envelope)
  }
}

pub fn snapshot_from_summary(ticker: &Ticker, envelope: QuoteSummaryEnvelope) -> Result<CompanySnapshot, DashboardError> {
  let summary = envelope.quote_summary;
  if let Some(error) = summary.error {
    log::error!("Quote summary error for {}: {}", ticker, error.describe());
    return Err(DashboardError::data_unavailable(ticker.as_str(), error.describe()));
  }

  let result = summary.result.and_then(|results| results.into_iter().next())
    .ok_or_else(|| DashboardError::data_unavailable(ticker.as_str(), "provider returned no data"))?;

  let profile: CompanyProfile = match result.price {
    Some(price) => CompanyProfile { name: price.long_name.or(price.short_name), currency: price.currency },
    None => CompanyProfile::default(),
  };

  let esg: EsgScores = match result.esg_scores {
    Some(block) => esg_factors(&block),
    None => {
      log::info!("No ESG coverage for {}", ticker);
      EsgScores::default()
    }
  };

  Ok(CompanySnapshot { profile, esg })
}

/// Keeps the numeric factors of an `esgScores` block, unwrapping Yahoo's
/// `{"raw": .., "fmt": ..}` values.
pub fn esg_factors(block: &Map<String, Value>) -> EsgScores {
  let factors: BTreeMap<String, f64> = block.iter()
    .filter(|(key, _)| !NON_FACTOR_KEYS.contains(&key.as_str()))
    .filter_map(|(key, value)| {
      let score: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        _ => None,
      };
      score.map(|s| (key.clone(), s))
    })
    .collect();
  EsgScores::new(factors)
}

pub fn history_from_chart(envelope: ChartEnvelope) -> Result<Vec<PricePoint>, DashboardError> {
  let chart = envelope.chart;
  if let Some(error) = chart.error {
    return Err(DashboardError::PriceHistoryUnavailable(error.describe()));
  }

  let result = chart.result.and_then(|results| results.into_iter().next())
    .ok_or_else(|| DashboardError::PriceHistoryUnavailable("provider returned no data".to_string()))?;

  let closes: Vec<Option<f64>> = result.indicators.quote.into_iter().next().map(|q| q.close).unwrap_or_default();

  // Days without a close (halts, partial sessions) are dropped.
  let mut prices: Vec<PricePoint> = result.timestamp.iter().zip(closes.iter())
    .filter_map(|(ts, close)| {
      let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
      close.map(|c| price_point(date, c))
    })
    .collect();

  prices.sort_by_key(|p| p.date);
  Ok(prices)
}

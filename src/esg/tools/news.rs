use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{Duration as DateSpan, NaiveDate};
use reqwest::{Client, Response};

use crate::app::config::Config;
use crate::esg::data::data::{NewsApiResponse, NewsQuery};
use crate::esg::data::models::{Headline, Ticker};
use crate::esg::error::DashboardError;

const REMOVED_TITLE: &str = "[Removed]";

/// News search provider seam.
#[async_trait]
pub trait NewsSearch: Send + Sync {
  async fn everything(&self, query: &NewsQuery) -> Result<NewsApiResponse, DashboardError>;
}

pub struct NewsApiClient {
  base_url: String,
  client: Client,
}

impl NewsApiClient {
  pub fn new(config: &Config) -> anyhow::Result<Self> {
    let client: Client = Client::builder()
      .timeout(Duration::from_secs(config.http_timeout_secs))
      .build()?;
    Ok(NewsApiClient { base_url: config.news_base_url.trim_end_matches('/').to_string(), client })
  }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
  async fn everything(&self, query: &NewsQuery) -> Result<NewsApiResponse, DashboardError> {
    let url: String = format!("{}/v2/everything", self.base_url);
    log::debug!("Searching news for {:?} from {}", query.q, query.from);

    let response: Response = self.client.get(&url).query(query).send().await
      .map_err(|e| DashboardError::FetchFailed(e.to_string()))?;

    // Error statuses still carry a {"status":"error", ...} body worth surfacing.
    let status = response.status();
    match response.json::<NewsApiResponse>().await {
      Ok(body) => Ok(body),
      Err(_) if !status.is_success() => Err(DashboardError::FetchFailed(format!("provider answered {}", status))),
      Err(e) => Err(DashboardError::FetchFailed(e.to_string())),
    }
  }
}

/// Pulls the most popular recent headlines for a ticker.
///
/// The credential is taken once from `Config`; without it no request is made.
pub struct NewsFetcher {
  search: Arc<dyn NewsSearch>,
  api_key: Option<String>,
  lookback_days: i64,
  max_headlines: usize,
}

impl NewsFetcher {
  pub fn new(search: Arc<dyn NewsSearch>, config: &Config) -> Self {
    NewsFetcher {
      search,
      api_key: config.news_api_key.clone(),
      lookback_days: config.news_lookback_days,
      max_headlines: config.news_max_headlines,
    }
  }

  pub async fn fetch_headlines(&self, ticker: &Ticker, today: NaiveDate) -> Result<Vec<Headline>, DashboardError> {
    let api_key: &str = match self.api_key.as_deref() {
      Some(key) if !key.trim().is_empty() => key,
      _ => {
        log::warn!("NEWSAPI_KEY missing, skipping news for {}", ticker);
        return Err(DashboardError::CredentialMissing);
      }
    };

    let from: NaiveDate = self.window_start(today);
    let query = NewsQuery {
      q: ticker.to_string(),
      from: from.format("%Y-%m-%d").to_string(),
      sort_by: "popularity".to_string(),
      api_key: api_key.to_string(),
    };

    let response: NewsApiResponse = self.search.everything(&query).await?;
    if !response.is_ok() {
      log::error!("News provider error for {}: {}", ticker, response.describe_error());
      return Err(DashboardError::FetchFailed(response.describe_error()));
    }

    let headlines: Vec<Headline> = response.articles.into_iter()
      .filter_map(|article| {
        let title: String = article.title?.trim().to_string();
        if title.is_empty() || title == REMOVED_TITLE {
          return None;
        }
        Some(Headline { title, source: article.source.and_then(|s| s.name), url: article.url })
      })
      .take(self.max_headlines)
      .collect();

    log::info!("Fetched {} headlines for {}", headlines.len(), ticker);
    Ok(headlines)
  }

  /// First day of the search window. A lookback that is negative or reaches
  /// outside the calendar falls back to the default week.
  pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
    let start: Option<NaiveDate> = Some(self.lookback_days)
      .filter(|days| *days >= 0)
      .and_then(DateSpan::try_days)
      .and_then(|span| today.checked_sub_signed(span));

    match start {
      Some(start) => start,
      None => {
        let fallback: i64 = Config::default().news_lookback_days;
        log::warn!("News lookback of {} days is out of range, using {}", self.lookback_days, fallback);
        today.checked_sub_signed(DateSpan::days(fallback)).unwrap_or(today)
      }
    }
  }
}

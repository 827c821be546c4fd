#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use esg_dashboard::app::config::Config;
use esg_dashboard::app::services::dashboard_service::DashboardService;
use esg_dashboard::esg::data::data::{NewsApiResponse, NewsArticle, NewsQuery};
use esg_dashboard::esg::data::models::{
  CompanyProfile, CompanySnapshot, EsgScores, PricePoint, SentimentLabel, SentimentResult, Ticker,
};
use esg_dashboard::esg::error::DashboardError;
use esg_dashboard::esg::llm::model_provider::SentimentModel;
use esg_dashboard::esg::llm::models::SentimentClassifier;
use esg_dashboard::esg::tools::market::MarketDataSource;
use esg_dashboard::esg::tools::news::{NewsFetcher, NewsSearch};

pub fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

pub fn esg(e: f64, s: f64, g: f64) -> EsgScores {
  vec![("environmentScore", e), ("socialScore", s), ("governanceScore", g)].into_iter().collect()
}

pub fn prices() -> Vec<PricePoint> {
  vec![
    PricePoint { date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), close: 200.0 },
    PricePoint { date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(), close: 210.0 },
    PricePoint { date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), close: 199.5 },
  ]
}

pub struct FakeMarket {
  pub company: Result<CompanySnapshot, DashboardError>,
  pub history: Result<Vec<PricePoint>, DashboardError>,
}

impl FakeMarket {
  pub fn with_esg(esg: EsgScores) -> Self {
    FakeMarket {
      company: Ok(CompanySnapshot {
        profile: CompanyProfile { name: Some("Apple Inc.".into()), currency: Some("USD".into()) },
        esg,
      }),
      history: Ok(prices()),
    }
  }
}

#[async_trait]
impl MarketDataSource for FakeMarket {
  async fn company(&self, _ticker: &Ticker) -> Result<CompanySnapshot, DashboardError> {
    self.company.clone()
  }

  async fn price_history(&self, _ticker: &Ticker) -> Result<Vec<PricePoint>, DashboardError> {
    self.history.clone()
  }
}

pub struct CountingNews {
  pub response: NewsApiResponse,
  pub calls: AtomicUsize,
}

impl CountingNews {
  pub fn with_titles(titles: &[&str]) -> Arc<Self> {
    let articles: Vec<NewsArticle> = titles.iter().map(|t| NewsArticle::titled(t)).collect();
    Arc::new(CountingNews { response: NewsApiResponse::ok(articles), calls: AtomicUsize::new(0) })
  }

  pub fn failing(code: &str, message: &str) -> Arc<Self> {
    Arc::new(CountingNews { response: NewsApiResponse::error(code, message), calls: AtomicUsize::new(0) })
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl NewsSearch for CountingNews {
  async fn everything(&self, _query: &NewsQuery) -> Result<NewsApiResponse, DashboardError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.response.clone())
  }
}

/// Labels every headline the same way.
pub struct UniformModel {
  pub label: SentimentLabel,
  pub calls: AtomicUsize,
}

impl UniformModel {
  pub fn new(label: SentimentLabel) -> Arc<Self> {
    Arc::new(UniformModel { label, calls: AtomicUsize::new(0) })
  }
}

#[async_trait]
impl SentimentModel for UniformModel {
  async fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, DashboardError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(texts.iter().map(|_| SentimentResult::new(self.label, 0.97)).collect())
  }
}

pub struct BrokenModel;

#[async_trait]
impl SentimentModel for BrokenModel {
  async fn classify(&self, _texts: &[String]) -> Result<Vec<SentimentResult>, DashboardError> {
    Err(DashboardError::ModelFailed("Model ProsusAI/finbert is currently loading".to_string()))
  }
}

pub fn config_with_key(key: Option<&str>) -> Config {
  let mut config = Config::default();
  config.news_api_key = key.map(String::from);
  config
}

pub fn service(
  market: FakeMarket,
  news: Arc<CountingNews>,
  model: Arc<dyn SentimentModel>,
  config: &Config,
) -> DashboardService {
  DashboardService::new(
    Arc::new(market),
    NewsFetcher::new(news, config),
    SentimentClassifier::with_model(config.clone(), model),
  )
}

pub const FIVE_HEADLINES: [&str; 5] = [
  "Apple posts record quarter",
  "Apple expands renewable energy program",
  "Analysts raise Apple price targets",
  "Apple unveils new accessibility features",
  "Apple dividend increase cheers investors",
];

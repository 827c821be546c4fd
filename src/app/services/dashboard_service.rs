use std::sync::Arc;
use chrono::NaiveDate;

use crate::esg::data::models::{
  CompanySnapshot, CompositeScore, Dashboard, EsgSection, Headline, NewsSection, PricePoint, ReturnsSection, Ticker,
};
use crate::esg::error::DashboardError;
use crate::esg::llm::models::SentimentClassifier;
use crate::esg::scoring::composite::{composite_score, mean_sentiment};
use crate::esg::tools::market::MarketDataSource;
use crate::esg::tools::news::NewsFetcher;
use crate::esg::tools::returns::daily_returns;

/// Runs fetch -> reshape -> score for one ticker.
///
/// Market data and news are independent and fetched together; sentiment runs
/// once both are in. Only a failed company/ESG lookup aborts the run, every
/// other failure becomes a notice in its own section.
pub struct DashboardService {
  market: Arc<dyn MarketDataSource>,
  news: NewsFetcher,
  classifier: SentimentClassifier,
}

impl DashboardService {
  pub fn new(market: Arc<dyn MarketDataSource>, news: NewsFetcher, classifier: SentimentClassifier) -> Self {
    DashboardService { market, news, classifier }
  }

  pub async fn build_dashboard(&self, ticker: &Ticker, today: NaiveDate) -> Result<Dashboard, DashboardError> {
    log::info!("Building dashboard for {}", ticker);

    let (company, history, headlines) = futures::join!(
      self.market.company(ticker),
      self.market.price_history(ticker),
      self.news.fetch_headlines(ticker, today),
    );

    let company: CompanySnapshot = match company {
      Ok(company) => company,
      Err(e) => {
        log::error!("Halting dashboard for {}: {}", ticker, e);
        return Err(e);
      }
    };

    let esg: EsgSection = if company.esg.is_empty() {
      EsgSection::NoCoverage { notice: DashboardError::NoCoverage(ticker.to_string()).to_string() }
    } else {
      EsgSection::Scores { scores: company.esg.clone() }
    };

    let news: NewsSection = self.news_section(ticker, headlines).await;
    let composite: CompositeScore = composite_score(&company.esg, news.mean_sentiment());
    let returns: ReturnsSection = returns_section(ticker, history);

    Ok(Dashboard { ticker: ticker.clone(), profile: company.profile, esg, news, composite, returns })
  }

  async fn news_section(&self, ticker: &Ticker, headlines: Result<Vec<Headline>, DashboardError>) -> NewsSection {
    let headlines: Vec<Headline> = match headlines {
      Ok(headlines) => headlines,
      Err(e @ DashboardError::CredentialMissing) => return NewsSection::CredentialMissing { notice: e.to_string() },
      Err(e) => {
        log::warn!("News unavailable for {}: {}", ticker, e);
        return NewsSection::FetchFailed { notice: e.to_string() };
      }
    };

    match self.classifier.classify(&headlines).await {
      Ok(sentiments) => {
        let mean_sentiment: Option<f64> = mean_sentiment(&sentiments);
        NewsSection::Classified { headlines, sentiments, mean_sentiment }
      }
      Err(e) => {
        log::error!("Sentiment classification failed for {}: {}", ticker, e);
        NewsSection::Unclassified { headlines, notice: e.to_string() }
      }
    }
  }
}

fn returns_section(ticker: &Ticker, history: Result<Vec<PricePoint>, DashboardError>) -> ReturnsSection {
  let prices: Vec<PricePoint> = match history {
    Ok(prices) => prices,
    Err(e) => {
      log::warn!("Price history unavailable for {}: {}", ticker, e);
      return ReturnsSection::Unavailable { notice: e.to_string() };
    }
  };

  match daily_returns(&prices) {
    Ok(returns) => ReturnsSection::Series { returns },
    Err(e) => {
      log::error!("Could not compute returns for {}: {}", ticker, e);
      ReturnsSection::Unavailable { notice: DashboardError::PriceHistoryUnavailable(e.to_string()).to_string() }
    }
  }
}

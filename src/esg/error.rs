use thiserror::Error;

/// Conditions a dashboard run can hit.
///
/// Only `DataUnavailable` stops a run; the others are rendered as a notice in
/// their own section while the rest of the page is still built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
  #[error("Unable to fetch ESG data for {ticker}: {reason}")]
  DataUnavailable { ticker: String, reason: String },

  #[error("ESG data not available for {0}")]
  NoCoverage(String),

  #[error("No NEWSAPI_KEY configured, news sentiment is disabled")]
  CredentialMissing,

  #[error("Failed to fetch news: {0}")]
  FetchFailed(String),

  #[error("Price history unavailable: {0}")]
  PriceHistoryUnavailable(String),

  #[error("Sentiment model failed: {0}")]
  ModelFailed(String),
}

impl DashboardError {
  pub fn data_unavailable(ticker: &str, reason: impl ToString) -> Self {
    DashboardError::DataUnavailable { ticker: ticker.to_string(), reason: reason.to_string() }
  }

  /// True for the one condition that halts the whole render.
  pub fn is_fatal(&self) -> bool {
    matches!(self, DashboardError::DataUnavailable { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_data_unavailable_is_fatal() {
    assert!(DashboardError::data_unavailable("AAPL", "timeout").is_fatal());
    assert!(!DashboardError::NoCoverage("AAPL".into()).is_fatal());
    assert!(!DashboardError::CredentialMissing.is_fatal());
    assert!(!DashboardError::FetchFailed("rateLimited".into()).is_fatal());
    assert!(!DashboardError::PriceHistoryUnavailable("404".into()).is_fatal());
    assert!(!DashboardError::ModelFailed("loading".into()).is_fatal());
  }

  #[test]
  fn messages_are_user_facing() {
    let err = DashboardError::data_unavailable("ZZZZ", "Quote not found for symbol: ZZZZ");
    assert_eq!(err.to_string(), "Unable to fetch ESG data for ZZZZ: Quote not found for symbol: ZZZZ");
    assert_eq!(DashboardError::FetchFailed("apiKeyInvalid".into()).to_string(), "Failed to fetch news: apiKeyInvalid");
  }
}

use crate::esg::data::models::{CompositeScore, EsgScores, SentimentResult};

pub const ENVIRONMENT_WEIGHT: f64 = 0.3;
pub const SOCIAL_WEIGHT: f64 = 0.3;
pub const GOVERNANCE_WEIGHT: f64 = 0.2;
pub const SENTIMENT_WEIGHT: f64 = 0.2;
/// Mean sentiment lives in [0, 1]; ESG factors are on a 0-10ish scale.
pub const SENTIMENT_SCALE: f64 = 10.0;

/// Average of the label weights (positive 1, neutral 0.5, negative 0).
/// `None` when nothing was classified.
pub fn mean_sentiment(results: &[SentimentResult]) -> Option<f64> {
  if results.is_empty() {
    return None;
  }
  let total: f64 = results.iter().map(|r| r.label.weight()).sum();
  Some(total / results.len() as f64)
}

pub fn composite_score(esg: &EsgScores, mean_sentiment: Option<f64>) -> CompositeScore {
  let mean: f64 = match (esg.is_empty(), mean_sentiment) {
    (false, Some(mean)) => mean,
    (true, Some(_)) => return CompositeScore::Unavailable { reason: "ESG scores".to_string() },
    (false, None) => return CompositeScore::Unavailable { reason: "news sentiment".to_string() },
    (true, None) => return CompositeScore::Unavailable { reason: "ESG scores and news sentiment".to_string() },
  };

  let value: f64 = esg.environment() * ENVIRONMENT_WEIGHT
    + esg.social() * SOCIAL_WEIGHT
    + esg.governance() * GOVERNANCE_WEIGHT
    + mean * SENTIMENT_SCALE * SENTIMENT_WEIGHT;

  CompositeScore::Available { value }
}

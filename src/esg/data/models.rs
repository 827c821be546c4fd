use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;
use serde::{Serialize, Deserialize, Deserializer};

pub const ENVIRONMENT_SCORE: &str = "environmentScore";
pub const SOCIAL_SCORE: &str = "socialScore";
pub const GOVERNANCE_SCORE: &str = "governanceScore";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
  /// Uppercases and trims free-text input. Anything else, including an empty
  /// string, is passed through and left for the providers to reject.
  pub fn resolve(input: &str) -> Self {
    Ticker(input.trim().to_uppercase())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Ticker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
  pub name: Option<String>,
  pub currency: Option<String>,
}

/// Factor name -> score, as reported by the market data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EsgScores(BTreeMap<String, f64>);

impl EsgScores {
  pub fn new(scores: BTreeMap<String, f64>) -> Self {
    EsgScores(scores)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, factor: &str) -> Option<f64> {
    self.0.get(factor).copied()
  }

  pub fn environment(&self) -> f64 {
    self.get(ENVIRONMENT_SCORE).unwrap_or(0.0)
  }

  pub fn social(&self) -> f64 {
    self.get(SOCIAL_SCORE).unwrap_or(0.0)
  }

  pub fn governance(&self) -> f64 {
    self.get(GOVERNANCE_SCORE).unwrap_or(0.0)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
    self.0.iter().map(|(factor, score)| (factor.as_str(), *score))
  }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EsgScores {
  fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
    EsgScores(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

/// What the market data provider knows about a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
  pub profile: CompanyProfile,
  pub esg: EsgScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
  pub date: NaiveDate,
  pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
  pub date: NaiveDate,
  #[serde(rename = "return")]
  pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
  pub title: String,
  pub source: Option<String>,
  pub url: Option<String>,
}

impl Headline {
  pub fn new(title: &str) -> Self {
    Headline { title: title.to_string(), source: None, url: None }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
  Positive,
  Neutral,
  Negative,
}

impl SentimentLabel {
  pub fn as_str(&self) -> &'static str {
    match self {
      SentimentLabel::Positive => "positive",
      SentimentLabel::Neutral => "neutral",
      SentimentLabel::Negative => "negative",
    }
  }

  /// Contribution of one headline to the mean sentiment.
  pub fn weight(&self) -> f64 {
    match self {
      SentimentLabel::Positive => 1.0,
      SentimentLabel::Neutral => 0.5,
      SentimentLabel::Negative => 0.0,
    }
  }
}

impl FromStr for SentimentLabel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "positive" => Ok(SentimentLabel::Positive),
      "neutral" => Ok(SentimentLabel::Neutral),
      "negative" => Ok(SentimentLabel::Negative),
      _ => Err(format!("Unknown sentiment label: {}", s)),
    }
  }
}

impl fmt::Display for SentimentLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

pub fn deserialize_label<'de, D>(deserializer: D) -> Result<SentimentLabel, D::Error> where D: Deserializer<'de>,
{
  let s = String::deserialize(deserializer)?;
  SentimentLabel::from_str(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
  #[serde(deserialize_with = "deserialize_label")]
  pub label: SentimentLabel,
  pub score: f64,
}

impl SentimentResult {
  pub fn new(label: SentimentLabel, score: f64) -> Self {
    SentimentResult { label, score }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EsgSection {
  Scores { scores: EsgScores },
  NoCoverage { notice: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NewsSection {
  /// Headlines and one sentiment per headline, in the same order.
  Classified {
    headlines: Vec<Headline>,
    sentiments: Vec<SentimentResult>,
    mean_sentiment: Option<f64>,
  },
  /// Headlines were fetched but the model could not classify them.
  Unclassified { headlines: Vec<Headline>, notice: String },
  CredentialMissing { notice: String },
  FetchFailed { notice: String },
}

impl NewsSection {
  pub fn mean_sentiment(&self) -> Option<f64> {
    match self {
      NewsSection::Classified { mean_sentiment, .. } => *mean_sentiment,
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CompositeScore {
  Available { value: f64 },
  Unavailable { reason: String },
}

impl CompositeScore {
  pub fn value(&self) -> Option<f64> {
    match self {
      CompositeScore::Available { value } => Some(*value),
      CompositeScore::Unavailable { .. } => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReturnsSection {
  Series { returns: Vec<ReturnPoint> },
  Unavailable { notice: String },
}

/// Everything one run produces, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub ticker: Ticker,
  pub profile: CompanyProfile,
  pub esg: EsgSection,
  pub news: NewsSection,
  pub composite: CompositeScore,
  pub returns: ReturnsSection,
}

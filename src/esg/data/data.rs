use reqwest::header::{HeaderValue, HeaderMap, ACCEPT, USER_AGENT};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

pub const BROWSER_USER_AGENT: &str =
  "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Headers Yahoo expects before it will hand out cookies and a crumb.
#[derive(Debug, Clone)]
pub struct ProviderHeaderData {
  pub user_agent: String,
  pub accept: String,
}

impl ProviderHeaderData {
  pub fn new() -> Self {
    ProviderHeaderData { user_agent: BROWSER_USER_AGENT.to_string(), accept: "application/json".to_string() }
  }

  pub fn to_header_map(&self) -> HeaderMap {
    let mut headers: HeaderMap = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
      headers.insert(USER_AGENT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&self.accept) {
      headers.insert(ACCEPT, value);
    }
    return headers;
  }
}

// ---- Yahoo Finance ----

#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummaryQuery {
  pub modules: String,
  pub crumb: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartQuery {
  pub range: String,
  pub interval: String,
}

impl ChartQuery {
  pub fn one_year_daily() -> Self {
    ChartQuery { range: "1y".to_string(), interval: "1d".to_string() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct YahooError {
  pub code: Option<String>,
  pub description: Option<String>,
}

impl YahooError {
  pub fn describe(&self) -> String {
    match (&self.code, &self.description) {
      (_, Some(description)) if !description.is_empty() => description.clone(),
      (Some(code), _) => code.clone(),
      _ => "unknown provider error".to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryEnvelope {
  pub quote_summary: QuoteSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummary {
  pub result: Option<Vec<QuoteSummaryResult>>,
  pub error: Option<YahooError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
  pub price: Option<PriceModule>,
  pub esg_scores: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
  pub long_name: Option<String>,
  pub short_name: Option<String>,
  pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
  pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
  pub result: Option<Vec<ChartResult>>,
  pub error: Option<YahooError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
  #[serde(default)]
  pub timestamp: Vec<i64>,
  pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
  #[serde(default)]
  pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuote {
  #[serde(default)]
  pub close: Vec<Option<f64>>,
}

// ---- NewsAPI ----

#[derive(Debug, Clone, Serialize)]
pub struct NewsQuery {
  pub q: String,
  pub from: String,
  #[serde(rename = "sortBy")]
  pub sort_by: String,
  #[serde(rename = "apiKey")]
  pub api_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsApiResponse {
  pub status: String,
  pub code: Option<String>,
  pub message: Option<String>,
  #[serde(default)]
  pub articles: Vec<NewsArticle>,
}

impl NewsApiResponse {
  pub fn ok(articles: Vec<NewsArticle>) -> Self {
    NewsApiResponse { status: "ok".to_string(), code: None, message: None, articles }
  }

  pub fn error(code: &str, message: &str) -> Self {
    NewsApiResponse {
      status: "error".to_string(),
      code: Some(code.to_string()),
      message: Some(message.to_string()),
      articles: Vec::new(),
    }
  }

  pub fn is_ok(&self) -> bool {
    self.status == "ok"
  }

  pub fn describe_error(&self) -> String {
    self.message.clone()
      .or_else(|| self.code.clone())
      .unwrap_or_else(|| format!("provider returned status {:?}", self.status))
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
  pub source: Option<NewsSource>,
  pub title: Option<String>,
  pub url: Option<String>,
}

impl NewsArticle {
  pub fn titled(title: &str) -> Self {
    NewsArticle { source: None, title: Some(title.to_string()), url: None }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSource {
  pub id: Option<String>,
  pub name: Option<String>,
}

// ---- Sentiment models ----

#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
  pub inputs: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
  pub label: String,
  pub score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceError {
  pub error: String,
}

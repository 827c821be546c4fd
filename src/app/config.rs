use std::env;
use std::str::FromStr;

use log;

use crate::esg::llm::model_provider::SentimentProvider;

/// Process-wide settings, read once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct Config {
  pub host: String,
  pub port: u16,
  pub http_timeout_secs: u64,
  pub yahoo_base_url: String,
  pub yahoo_cookie_url: String,
  pub news_api_key: Option<String>,
  pub news_base_url: String,
  pub news_lookback_days: i64,
  pub news_max_headlines: usize,
  pub sentiment_provider: SentimentProvider,
  pub sentiment_model: String,
  pub huggingface_api_key: Option<String>,
  pub huggingface_base_url: String,
  pub groq_api_key: Option<String>,
  pub groq_base_url: String,
}

impl Default for Config {
  fn default() -> Self {
    let sentiment_provider: SentimentProvider = SentimentProvider::HuggingFace;
    Config {
      host: "127.0.0.1".to_string(),
      port: 8080,
      http_timeout_secs: 20,
      yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
      yahoo_cookie_url: "https://fc.yahoo.com".to_string(),
      news_api_key: None,
      news_base_url: "https://newsapi.org".to_string(),
      news_lookback_days: 7,
      news_max_headlines: 5,
      sentiment_provider,
      sentiment_model: sentiment_provider.default_model().to_string(),
      huggingface_api_key: None,
      huggingface_base_url: "https://api-inference.huggingface.co".to_string(),
      groq_api_key: None,
      groq_base_url: "https://api.groq.com/openai/v1".to_string(),
    }
  }
}

fn optional_var(key: &str) -> Option<String> {
  env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: String) -> String {
  optional_var(key).unwrap_or_else(|| {
    log::debug!("{} not set, using default {}", key, default);
    default
  })
}

fn parsed_var<T: FromStr + ToString>(key: &str, default: T) -> T {
  match optional_var(key) {
    Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
      log::error!("Invalid value {:?} for {}, using default {}", raw, key, default.to_string());
      default
    }),
    None => default,
  }
}

impl Config {
  pub fn load() -> Self {
    match dotenv::dotenv() {
      Ok(_) => log::info!("Loaded .env file"),
      Err(_) => log::warn!("No .env file found, reading configuration from the environment"),
    }

    let defaults: Config = Config::default();

    let news_api_key: Option<String> = optional_var("NEWSAPI_KEY");
    if news_api_key.is_none() {
      log::warn!("NEWSAPI_KEY not found, news sentiment will be unavailable");
    }

    let sentiment_provider: SentimentProvider = match optional_var("SENTIMENT_PROVIDER") {
      Some(raw) => SentimentProvider::from_str(&raw).unwrap_or_else(|e| {
        log::error!("{}, falling back to {}", e, defaults.sentiment_provider);
        defaults.sentiment_provider
      }),
      None => defaults.sentiment_provider,
    };
    let sentiment_model: String = var_or("SENTIMENT_MODEL", sentiment_provider.default_model().to_string());

    let groq_api_key: Option<String> = optional_var("GROQ_API_KEY");
    if sentiment_provider == SentimentProvider::Groq && groq_api_key.is_none() {
      log::error!("SENTIMENT_PROVIDER is groq but GROQ_API_KEY is not set");
    }

    return Config {
      host: var_or("DASHBOARD_HOST", defaults.host),
      port: parsed_var("DASHBOARD_PORT", defaults.port),
      http_timeout_secs: parsed_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
      yahoo_base_url: var_or("YAHOO_BASE_URL", defaults.yahoo_base_url),
      yahoo_cookie_url: var_or("YAHOO_COOKIE_URL", defaults.yahoo_cookie_url),
      news_api_key,
      news_base_url: var_or("NEWSAPI_BASE_URL", defaults.news_base_url),
      news_lookback_days: parsed_var("NEWS_LOOKBACK_DAYS", defaults.news_lookback_days),
      news_max_headlines: parsed_var("NEWS_MAX_HEADLINES", defaults.news_max_headlines),
      sentiment_provider,
      sentiment_model,
      huggingface_api_key: optional_var("HUGGINGFACE_API_KEY"),
      huggingface_base_url: var_or("HUGGINGFACE_BASE_URL", defaults.huggingface_base_url),
      groq_api_key,
      groq_base_url: var_or("GROQ_BASE_URL", defaults.groq_base_url),
    }
  }
}

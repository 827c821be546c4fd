use std::sync::Arc;
use once_cell::sync::OnceCell;

use crate::app::config::Config;
use crate::esg::data::models::{Headline, SentimentResult};
use crate::esg::error::DashboardError;
use crate::esg::llm::finbert::FinbertProvider;
use crate::esg::llm::groq::GroqProvider;
use crate::esg::llm::model_provider::{SentimentModel, SentimentProvider};

pub fn get_model(config: &Config) -> Result<Arc<dyn SentimentModel>, DashboardError> {
  log::info!("Initializing sentiment model for provider: {}, model: {}", config.sentiment_provider, config.sentiment_model);

  match config.sentiment_provider {
    SentimentProvider::HuggingFace => {
      let model = FinbertProvider::new(
        &config.huggingface_base_url,
        &config.sentiment_model,
        config.huggingface_api_key.clone(),
        config.http_timeout_secs,
      )?;
      Ok(Arc::new(model))
    }
    SentimentProvider::Groq => {
      let api_key: &str = config.groq_api_key.as_deref()
        .ok_or_else(|| DashboardError::ModelFailed("GROQ_API_KEY is not configured".to_string()))?;
      let model = GroqProvider::new(&config.groq_base_url, &config.sentiment_model, api_key, config.http_timeout_secs)?;
      Ok(Arc::new(model))
    }
  }
}

/// Classifies headlines with a model that is built on first use and then
/// shared by every request. The model itself holds no per-ticker state.
pub struct SentimentClassifier {
  config: Config,
  model: OnceCell<Arc<dyn SentimentModel>>,
}

impl SentimentClassifier {
  pub fn new(config: Config) -> Self {
    SentimentClassifier { config, model: OnceCell::new() }
  }

  pub fn with_model(config: Config, model: Arc<dyn SentimentModel>) -> Self {
    SentimentClassifier { config, model: OnceCell::with_value(model) }
  }

  pub fn is_loaded(&self) -> bool {
    self.model.get().is_some()
  }

  fn model(&self) -> Result<&Arc<dyn SentimentModel>, DashboardError> {
    self.model.get_or_try_init(|| get_model(&self.config))
  }

  pub async fn classify(&self, headlines: &[Headline]) -> Result<Vec<SentimentResult>, DashboardError> {
    if headlines.is_empty() {
      return Ok(Vec::new());
    }

    let texts: Vec<String> = headlines.iter().map(|h| h.title.clone()).collect();
    let results: Vec<SentimentResult> = self.model()?.classify(&texts).await?;

    if results.len() != texts.len() {
      log::error!("Sentiment model returned {} results for {} headlines", results.len(), texts.len());
      return Err(DashboardError::ModelFailed(format!(
        "expected {} classifications, got {}", texts.len(), results.len()
      )));
    }
    Ok(results)
  }
}

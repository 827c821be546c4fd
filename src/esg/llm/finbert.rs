use std::str::FromStr;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::esg::data::data::{InferenceError, InferenceRequest, LabelScore};
use crate::esg::data::models::{SentimentLabel, SentimentResult};
use crate::esg::error::DashboardError;
use crate::esg::llm::model_provider::SentimentModel;

/// FinBERT served through the Hugging Face inference API.
pub struct FinbertProvider {
  endpoint: String,
  api_key: Option<String>,
  client: Client,
}

impl FinbertProvider {
  pub fn new(base_url: &str, model_name: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self, DashboardError> {
    let client: Client = Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()
      .map_err(|e| DashboardError::ModelFailed(e.to_string()))?;
    let endpoint: String = format!("{}/models/{}", base_url.trim_end_matches('/'), model_name);
    Ok(FinbertProvider { endpoint, api_key, client })
  }
}

#[async_trait]
impl SentimentModel for FinbertProvider {
  async fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, DashboardError> {
    let mut request = self.client.post(&self.endpoint).json(&InferenceRequest { inputs: texts });
    if let Some(key) = &self.api_key {
      request = request.bearer_auth(key);
    }

    let response: Response = request.send().await.map_err(|e| DashboardError::ModelFailed(e.to_string()))?;
    let status = response.status();
    let body: String = response.text().await.map_err(|e| DashboardError::ModelFailed(e.to_string()))?;

    if !status.is_success() {
      // The inference API answers 503 with {"error": ...} while the model loads.
      let message: String = serde_json::from_str::<InferenceError>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("inference endpoint answered {}", status));
      log::error!("FinBERT inference failed: {}", message);
      return Err(DashboardError::ModelFailed(message));
    }

    let candidates: Vec<Vec<LabelScore>> = serde_json::from_str(&body)
      .map_err(|e| DashboardError::ModelFailed(format!("unexpected inference response: {}", e)))?;
    top_labels(candidates)
  }
}

/// Picks the highest-scoring class for each input.
pub fn top_labels(candidates: Vec<Vec<LabelScore>>) -> Result<Vec<SentimentResult>, DashboardError> {
  candidates.into_iter().map(|per_input| {
    let best: LabelScore = per_input.into_iter()
      .max_by(|a, b| a.score.total_cmp(&b.score))
      .ok_or_else(|| DashboardError::ModelFailed("model returned no classes".to_string()))?;
    let label: SentimentLabel = SentimentLabel::from_str(&best.label).map_err(DashboardError::ModelFailed)?;
    Ok(SentimentResult::new(label, best.score))
  }).collect()
}

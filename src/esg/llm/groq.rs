use std::time::Duration;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use async_trait::async_trait;

use crate::esg::data::data::LabelScore;
use crate::esg::data::models::SentimentResult;
use crate::esg::error::DashboardError;
use crate::esg::llm::finbert::top_labels;
use crate::esg::llm::model_provider::{ChatMessage, SentimentModel};

const CLASSIFIER_PROMPT: &str = "You are a financial sentiment classifier. For every numbered headline, \
classify its sentiment for the company's investors as positive, neutral or negative and give your \
confidence between 0 and 1. Answer only with JSON of the form \
{\"results\": [{\"label\": \"positive\", \"score\": 0.93}]} with one entry per headline, in order.";

#[derive(Serialize, Debug)]
struct GroqChatRequest {
  messages: Vec<ChatMessage>,
  model: String,
  temperature: f32,
  response_format: ResponseFormat,
}

#[derive(Serialize, Debug)]
struct ResponseFormat {
  #[serde(rename = "type")]
  kind: &'static str,
}

#[derive(Deserialize, Debug)]
struct GroqResponseMessage {
  content: String,
}

#[derive(Deserialize, Debug)]
struct GroqChoice {
  message: GroqResponseMessage,
}

#[derive(Deserialize, Debug)]
struct GroqChatResponse {
  choices: Vec<GroqChoice>,
}

#[derive(Deserialize, Debug)]
struct ClassifiedHeadlines {
  results: Vec<LabelScore>,
}

/// Sentiment through a Groq-hosted chat model, for deployments without a
/// Hugging Face endpoint.
pub struct GroqProvider {
  groq_url: String,
  api_key: String,
  model_name: String,
  client: Client,
}

impl GroqProvider {
  pub fn new(base_url: &str, model_name: &str, api_key: &str, timeout_secs: u64) -> Result<Self, DashboardError> {
    let groq_url: String = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let client: Client = Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()
      .map_err(|e| DashboardError::ModelFailed(e.to_string()))?;
    Ok(GroqProvider { groq_url, api_key: api_key.to_string(), model_name: model_name.to_string(), client })
  }
}

pub fn numbered_headlines(texts: &[String]) -> String {
  texts.iter().enumerate()
    .map(|(i, text)| format!("{}. {}", i + 1, text))
    .collect::<Vec<String>>()
    .join("\n")
}

pub fn parse_classification(content: &str) -> Result<Vec<SentimentResult>, DashboardError> {
  let parsed: ClassifiedHeadlines = serde_json::from_str(content.trim())
    .map_err(|e| DashboardError::ModelFailed(format!("unexpected model answer: {}", e)))?;
  top_labels(parsed.results.into_iter().map(|result| vec![result]).collect())
}

#[async_trait]
impl SentimentModel for GroqProvider {
  async fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, DashboardError> {
    let request: GroqChatRequest = GroqChatRequest {
      model: self.model_name.clone(),
      messages: vec![ChatMessage::system(CLASSIFIER_PROMPT), ChatMessage::user(&numbered_headlines(texts))],
      temperature: 0.0,
      response_format: ResponseFormat { kind: "json_object" },
    };

    let response: Response = self.client.post(&self.groq_url).bearer_auth(&self.api_key).json(&request).send().await
      .map_err(|e| DashboardError::ModelFailed(e.to_string()))?;

    if !response.status().is_success() {
      log::error!("Error getting response from Groq: {:?}", response.status());
      return Err(DashboardError::ModelFailed(format!("Groq answered {}", response.status())));
    }

    let groq_response: GroqChatResponse = response.json().await.map_err(|e| DashboardError::ModelFailed(e.to_string()))?;
    let first: GroqChoice = groq_response.choices.into_iter().next()
      .ok_or_else(|| DashboardError::ModelFailed("No response choices received from Groq".to_string()))?;
    parse_classification(&first.message.content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::esg::data::models::SentimentLabel;

  #[test]
  fn headlines_are_numbered_from_one() {
    let texts = vec!["Apple beats estimates".to_string(), "iPhone sales slow".to_string()];
    assert_eq!(numbered_headlines(&texts), "1. Apple beats estimates\n2. iPhone sales slow");
  }

  #[test]
  fn json_answer_is_parsed_in_order() {
    let content = r#" {"results": [{"label": "Positive", "score": 0.8}, {"label": "negative", "score": 0.65}]} "#;
    assert_eq!(parse_classification(content).unwrap(), vec![
      SentimentResult::new(SentimentLabel::Positive, 0.8),
      SentimentResult::new(SentimentLabel::Negative, 0.65),
    ]);
  }

  #[test]
  fn prose_answer_is_model_failure() {
    assert!(matches!(parse_classification("The first headline is positive."), Err(DashboardError::ModelFailed(_))));
  }
}

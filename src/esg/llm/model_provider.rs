use serde::{Serialize, Deserialize};
use std::str::FromStr;
use std::fmt;
use async_trait::async_trait;

use crate::esg::data::models::SentimentResult;
use crate::esg::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentProvider {
  HuggingFace,
  Groq,
}

impl SentimentProvider {
  pub fn default_model(&self) -> &'static str {
    match self {
      SentimentProvider::HuggingFace => "ProsusAI/finbert",
      SentimentProvider::Groq => "llama3-8b-8192",
    }
  }
}

impl fmt::Display for SentimentProvider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SentimentProvider::HuggingFace => write!(f, "HuggingFace"),
      SentimentProvider::Groq => write!(f, "Groq"),
    }
  }
}

impl FromStr for SentimentProvider {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "huggingface" | "hf" | "finbert" => Ok(SentimentProvider::HuggingFace),
      "groq" => Ok(SentimentProvider::Groq),
      _ => Err(format!("Unknown sentiment provider: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: &str) -> Self {
    ChatMessage { role: "system".to_string(), content: content.to_string() }
  }

  pub fn user(content: &str) -> Self {
    ChatMessage { role: "user".to_string(), content: content.to_string() }
  }
}

/// A three-class financial sentiment model.
///
/// Implementations return exactly one result per input text, in input order.
#[async_trait]
pub trait SentimentModel: Send + Sync {
  async fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, DashboardError>;
}

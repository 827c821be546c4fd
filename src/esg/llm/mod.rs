pub mod finbert;
pub mod groq;
pub mod model_provider;
pub mod models;

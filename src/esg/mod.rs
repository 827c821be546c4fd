pub mod data;
pub mod error;
pub mod llm;
pub mod render;
pub mod scoring;
pub mod tools;

//! ESG & sentiment dashboard: pulls a company's ESG scores and a year of
//! prices from Yahoo Finance, classifies recent news headlines with a
//! financial sentiment model, and blends both into one composite score.

pub mod app;
pub mod esg;

pub mod dashboard_service;
pub mod service;

/// Ticker shown when the page is opened without one.
pub const DEFAULT_TICKER: &str = "AAPL";

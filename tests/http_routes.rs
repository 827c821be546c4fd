mod common;

use actix_web::test;
use std::sync::Arc;

use common::*;
use esg_dashboard::app::factory::{AppState, CreateApp};
use esg_dashboard::esg::data::models::SentimentLabel;
use esg_dashboard::esg::error::DashboardError;

fn state(market: FakeMarket, news: Arc<CountingNews>, key: Option<&str>) -> AppState {
  let config = config_with_key(key);
  AppState::from_service(service(market, news, UniformModel::new(SentimentLabel::Positive), &config))
}

macro_rules! app {
  ($state:expr) => {
    test::init_service(CreateApp::new($state).build_app()).await
  };
}

#[actix_web::test]
async fn health_reports_ok() {
  let app = app!(state(FakeMarket::with_esg(esg(5.0, 4.0, 3.0)), CountingNews::with_titles(&[]), None));
  let body: serde_json::Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn page_renders_full_dashboard() {
  let app = app!(state(FakeMarket::with_esg(esg(5.0, 4.0, 3.0)), CountingNews::with_titles(&FIVE_HEADLINES), Some("key")));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/?ticker=aapl").to_request()).await;
  assert!(resp.status().is_success());
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

  assert!(html.contains("value=\"AAPL\""));
  assert!(html.contains("5.30"));
  assert!(html.contains("Apple posts record quarter"));
  assert!(html.contains("<polyline"));
}

#[actix_web::test]
async fn page_defaults_to_aapl() {
  let app = app!(state(FakeMarket::with_esg(esg(5.0, 4.0, 3.0)), CountingNews::with_titles(&[]), None));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

  assert!(html.contains("value=\"AAPL\""));
  assert!(html.contains("No NEWSAPI_KEY configured"));
  assert!(html.contains("Full score unavailable"));
}

#[actix_web::test]
async fn news_failure_hides_sentiment_table() {
  let app = app!(state(FakeMarket::with_esg(esg(5.0, 4.0, 3.0)), CountingNews::failing("apiKeyInvalid", "Your API key is invalid"), Some("bad")));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/?ticker=AAPL").to_request()).await;
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

  assert!(html.contains("Failed to fetch news: Your API key is invalid"));
  assert!(!html.contains("<th>label</th>"));
  assert!(html.contains("Full score unavailable"));
}

#[actix_web::test]
async fn json_endpoint_serializes_sections() {
  let app = app!(state(FakeMarket::with_esg(esg(5.0, 4.0, 3.0)), CountingNews::with_titles(&FIVE_HEADLINES), Some("key")));

  let body: serde_json::Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/dashboard?ticker=aapl").to_request()).await;

  assert_eq!(body["ticker"], "AAPL");
  assert_eq!(body["esg"]["state"], "scores");
  assert_eq!(body["esg"]["scores"]["environmentScore"], 5.0);
  assert_eq!(body["news"]["state"], "classified");
  assert_eq!(body["news"]["sentiments"][0]["label"], "positive");
  assert_eq!(body["composite"]["state"], "available");
  assert_eq!(body["returns"]["state"], "series");
}

#[actix_web::test]
async fn halted_run_is_bad_gateway_on_json_and_error_page_on_html() {
  let mut market = FakeMarket::with_esg(esg(5.0, 4.0, 3.0));
  market.company = Err(DashboardError::data_unavailable("ZZZZ", "Quote not found for symbol: ZZZZ"));
  let app = app!(state(market, CountingNews::with_titles(&FIVE_HEADLINES), Some("key")));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/dashboard?ticker=zzzz").to_request()).await;
  assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_GATEWAY);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/?ticker=zzzz").to_request()).await;
  assert!(resp.status().is_success());
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
  assert!(html.contains("Unable to fetch ESG data for ZZZZ"));
  assert!(!html.contains("ESG Score Breakdown"));
}

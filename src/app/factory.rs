use actix_web::{web, App};
use std::sync::Arc;

use crate::app::config::Config;
use crate::app::routes::routes::Routes;
use crate::esg::llm::models::SentimentClassifier;
use crate::esg::tools::market::{MarketDataSource, YahooFinance};
use crate::esg::tools::news::{NewsApiClient, NewsFetcher, NewsSearch};

use super::controller::dashboard_controller::DashboardController;
use super::services::dashboard_service::DashboardService;
use super::services::service::EsgDashboardServices;

#[derive(Clone)]
pub struct AppState {
  pub dashboard_controller: Arc<DashboardController>,
}

impl AppState {

  pub fn new(app_config: &Config) -> anyhow::Result<Self> {
    let market: Arc<dyn MarketDataSource> = Arc::new(YahooFinance::new(app_config)?);
    let search: Arc<dyn NewsSearch> = Arc::new(NewsApiClient::new(app_config)?);
    let news: NewsFetcher = NewsFetcher::new(search, app_config);
    let classifier: SentimentClassifier = SentimentClassifier::new(app_config.clone());

    Ok(AppState::from_service(DashboardService::new(market, news, classifier)))
  }

  pub fn from_service(dashboard_service: DashboardService) -> Self {
    let services: Arc<EsgDashboardServices> = Arc::new(EsgDashboardServices::new(dashboard_service));
    let dashboard_controller: Arc<DashboardController> = Arc::new(DashboardController::new(services));
    AppState { dashboard_controller }
  }
}

/// Builds the actix `App` for one worker. Workers share the same `AppState`,
/// so the sentiment model is loaded once per process.
pub struct CreateApp {
  app_state: AppState,
}

impl CreateApp {
  pub fn new(app_state: AppState) -> Self {
    CreateApp { app_state }
  }

  pub fn build_app(&self,) -> App<impl actix_web::dev::ServiceFactory<actix_web::dev::ServiceRequest,Config = (),Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,Error = actix_web::Error,InitError = (),>,> {
    App::new()
    .app_data(web::Data::new(self.app_state.dashboard_controller.clone()))
    .configure(Routes::configure)
  }
}

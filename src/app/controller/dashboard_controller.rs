use std::sync::Arc;
use anyhow::Error;

use crate::app::services::service::EsgDashboardServices;
use crate::esg::data::models::{Dashboard, Ticker};
use crate::esg::error::DashboardError;
use crate::esg::render::view::render_page;

pub struct DashboardController {
  services: Arc<EsgDashboardServices>,
}

impl DashboardController {
  pub fn new(services: Arc<EsgDashboardServices>) -> Self {
    DashboardController { services }
  }

  pub async fn dashboard(&self, raw_ticker: Option<&str>) -> (Ticker, Result<Dashboard, DashboardError>) {
    let ticker: Ticker = self.services.resolve_ticker(raw_ticker);
    let outcome = self.services.dashboard(&ticker).await;
    if let Err(e) = &outcome {
      log::error!("Dashboard for {} unavailable: {}", ticker, e);
    }
    (ticker, outcome)
  }

  pub async fn dashboard_page(&self, raw_ticker: Option<&str>) -> Result<String, Error> {
    let (ticker, outcome) = self.dashboard(raw_ticker).await;
    let html: String = render_page(ticker.as_str(), &outcome)?;
    return Ok(html);
  }
}

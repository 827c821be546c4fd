use super::dashboard_service::DashboardService;

use chrono::{Local, NaiveDate};

use crate::esg::data::models::{Dashboard, Ticker};
use crate::esg::error::DashboardError;

pub struct EsgDashboardServices {
  dashboard_service: DashboardService,
}

impl EsgDashboardServices {
  pub fn new(dashboard_service: DashboardService) -> Self {
    EsgDashboardServices { dashboard_service }
  }

  pub fn resolve_ticker(&self, raw_ticker: Option<&str>) -> Ticker {
    let raw_ticker: &str = raw_ticker.unwrap_or(super::DEFAULT_TICKER);
    Ticker::resolve(raw_ticker)
  }

  pub async fn dashboard(&self, ticker: &Ticker) -> Result<Dashboard, DashboardError> {
    let today: NaiveDate = Local::now().date_naive();
    return self.dashboard_service.build_dashboard(ticker, today).await;
  }
}

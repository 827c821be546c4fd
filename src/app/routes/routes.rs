use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use serde::Deserialize;

use crate::app::controller::dashboard_controller::DashboardController;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
  ticker: Option<String>,
}

pub struct Routes;

impl Routes {

  pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(Self::dashboard_page)));
    cfg.service(web::resource("/api/dashboard").route(web::get().to(Self::dashboard_json)));
    cfg.service(web::resource("/health").route(web::get().to(Self::health)));
  }

  async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
      "status": "ok",
      "Info": "ESG & Sentiment Dashboard.",
      "code": 200,
    }))
  }

  async fn dashboard_page(controller: web::Data<Arc<DashboardController>>, query: web::Query<DashboardQuery>) -> impl Responder {
    match controller.dashboard_page(query.ticker.as_deref()).await {
      Ok(html) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html),
      Err(e) => {
        log::error!("Failed to render dashboard page: {}", e);
        HttpResponse::InternalServerError().body(format!("Failed to render dashboard: {}", e))
      }
    }
  }

  async fn dashboard_json(controller: web::Data<Arc<DashboardController>>, query: web::Query<DashboardQuery>) -> impl Responder {
    let (ticker, outcome) = controller.dashboard(query.ticker.as_deref()).await;
    match outcome {
      Ok(dashboard) => HttpResponse::Ok().json(dashboard),
      Err(e) => HttpResponse::BadGateway().json(serde_json::json!({
        "ticker": ticker,
        "error": e.to_string(),
      })),
    }
  }
}

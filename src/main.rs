use actix_web::HttpServer;
use std::env;

use esg_dashboard::app::config::Config;
use esg_dashboard::app::factory::{AppState, CreateApp};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  if env::var_os("RUST_LOG").is_none() {
    env::set_var("RUST_LOG", "actix_web=info,esg_dashboard=debug");
  }
  env_logger::init();

  let config: Config = Config::load();
  let app_state: AppState = AppState::new(&config)?;

  log::info!("Serving ESG dashboard on http://{}:{}", config.host, config.port);

  let server_builder = HttpServer::new(move || {
    let factory: CreateApp = CreateApp::new(app_state.clone());
    factory.build_app().wrap(actix_web::middleware::Logger::default())
  });

  let server = server_builder.bind((config.host.as_str(), config.port))?;

  server.run().await?;

  Ok(())
}

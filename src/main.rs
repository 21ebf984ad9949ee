use assignment_dashboard::config::ServerConfig;
use assignment_dashboard::dashboard::Dashboard;
use assignment_dashboard::network::http_api;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let dashboard = match Dashboard::from_config(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            error!("Failed to seed catalog: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = http_api::start(config.bind, dashboard.queries()).await {
        error!("Failed to bind HTTP API on {}: {}", config.bind, e);
        std::process::exit(1);
    }
}

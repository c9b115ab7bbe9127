use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use ts_api::{app::create_app, config, routes::auth::AppState};
use ts_core::{InMemoryRevocationRepository, TokenService, TokenServiceConfig};
use ts_shared::{Environment, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    config::load_dotenv(environment);

    let config = config::load_for(environment).context("loading configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Tokenkeep API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the default JWT secret; set TS__AUTH__JWT__SECRET");
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("building token service configuration")?;
    let token_service = Arc::new(
        TokenService::new(InMemoryRevocationRepository::new(), token_config)
            .context("creating token service")?,
    );
    let app_state = web::Data::new(AppState::new(token_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config))
        .keep_alive(config.server.keep_alive_duration());
    if let Some(workers) = config.server.worker_count() {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use af_api::{create_app, AppState};
use af_core::{AuthService, AuthServiceConfig, KeyPair, TokenConfig, TokenFactory};
use af_infra::{connect_stores, RetryPolicy};
use af_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_level()),
    );

    info!("Starting AuthFlow API Server ({})", config.environment);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    let keys = KeyPair::from_config(&config.auth.jwt).context("Failed to load signing keys")?;
    let token_config = TokenConfig::from_jwt_config(&config.auth.jwt)?;
    let token_factory = Arc::new(TokenFactory::new(keys, token_config));

    let (users, cache) = connect_stores(&config, RetryPolicy::default())
        .await
        .context("Storage backends unavailable")?;

    let auth_service = Arc::new(AuthService::new(
        Arc::new(users),
        token_factory,
        Arc::new(cache),
        AuthServiceConfig::from_auth_config(&config.auth),
    ));

    if let Some(admin) = &config.auth.first_admin {
        if auth_service
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("Failed to seed administrator account")?
        {
            info!("Created administrator account {}", admin.email);
        }
    }

    let app_state = web::Data::new(AppState::new(auth_service));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let api_prefix = config.server.api_prefix.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors, &api_prefix));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}

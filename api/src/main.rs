use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use quill_core::{
    InMemoryRevocationStore, RevocationStore, RevocationSweeper, SweeperConfig, TokenService,
    TokenServiceConfig,
};
use quill_infra::{RedisClient, RedisRevocationStore};
use quill_shared::{AppConfig, RevocationBackend};
use tracing::info;

use quill_api::{app::create_app, telemetry::init_tracing, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Configuration errors are fatal; nothing starts with a missing secret
    let config = AppConfig::load().context("invalid configuration")?;

    init_tracing(&config.logging);
    info!(environment = %config.environment, "starting Quill auth server");

    let store: Arc<dyn RevocationStore> = match config.revocation.backend {
        RevocationBackend::Memory => {
            info!("using in-memory revocation store");
            Arc::new(InMemoryRevocationStore::new())
        }
        RevocationBackend::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;
            info!("using Redis revocation store");
            Arc::new(RedisRevocationStore::new(client))
        }
    };

    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt).context("invalid jwt configuration")?;
    let token_service = Arc::new(TokenService::new(token_config, store.clone()));

    let sweeper = RevocationSweeper::new(store, SweeperConfig::from(&config.revocation)).open();

    let app_state = web::Data::new(AppState::new(token_service));
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    sweeper.close().await;
    info!("server stopped");

    result.context("server error")
}

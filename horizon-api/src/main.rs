use std::net::SocketAddr;
use horizon_api::{app, state::{AppState, AuthConfig}};
use horizon_ledger::InventoryLedger;
use horizon_store::{app_config::Config, open_store, seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "horizon_api=debug,horizon_ledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Horizon API on port {}", config.server.port);

    let store = open_store(&config.storage).await?;
    let ledger = InventoryLedger::open(store, seed::bundled()?).await?;

    let app_state = AppState::new(
        ledger,
        AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

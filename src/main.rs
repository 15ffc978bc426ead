use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::bootstrap::{cancel_pair, SessionBootstrap, SessionState};
use inkpost::client::AppwriteClient;
use inkpost::config::Config;
use inkpost::services::AuthService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(endpoint = %config.appwrite.endpoint, "configuration loaded");

    // One shared client; services borrow it instead of building their own
    let client = Arc::new(AppwriteClient::new(config.appwrite)?);
    let auth = AuthService::new(client.clone());

    // Resolve the session once at startup
    let (bootstrap, mut state) = SessionBootstrap::new();
    let (_guard, cancel) = cancel_pair();
    bootstrap.resolve_session(&auth, &cancel).await;

    match &*state.borrow_and_update() {
        SessionState::Ready(event) => info!(?event, "startup complete"),
        SessionState::Loading => info!("startup cancelled before session resolution"),
    }

    Ok(())
}

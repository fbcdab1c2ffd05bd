use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinelist_api::config::Config;
use cinelist_api::middleware::{IdentityResolver, ProxyHeaderIdentity};
use cinelist_api::routes::create_router;
use cinelist_api::services::catalog::{CatalogProvider, TmdbCatalog};
use cinelist_api::services::{FavoriteService, ShareService};
use cinelist_api::state::AppState;
use cinelist_api::store::{create_pool, FavoriteStore, MemoryStore, PgStore, ShareStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cinelist_api=debug,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (favorite_store, share_store): (Arc<dyn FavoriteStore>, Arc<dyn ShareStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = create_pool(url).await.context("connecting to PostgreSQL")?;
                sqlx::migrate!()
                    .run(&pool)
                    .await
                    .context("running migrations")?;
                tracing::info!("Connected to PostgreSQL");

                let store = Arc::new(PgStore::new(pool));
                (store.clone(), store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, favorites are stored in memory only");
                let store = Arc::new(MemoryStore::new());
                (store.clone(), store)
            }
        };

    let catalog: Arc<dyn CatalogProvider> = Arc::new(TmdbCatalog::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    ));
    let identity: Arc<dyn IdentityResolver> = Arc::new(ProxyHeaderIdentity::new());

    let state = AppState::new(
        FavoriteService::new(favorite_store.clone()),
        ShareService::new(favorite_store, share_store),
        catalog,
        identity,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use crate::middleware::IdentityResolver;
use crate::services::catalog::CatalogProvider;
use crate::services::{FavoriteService, ShareService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub favorites: FavoriteService,
    pub shares: ShareService,
    pub catalog: Arc<dyn CatalogProvider>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(
        favorites: FavoriteService,
        shares: ShareService,
        catalog: Arc<dyn CatalogProvider>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            favorites,
            shares,
            catalog,
            identity,
        }
    }
}

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::models::OwnerId;
use crate::state::AppState;

/// HTTP header carrying the authenticated user id, set by the fronting
/// auth proxy
pub const OWNER_ID_HEADER: &str = "x-user-id";

/// Resolves the calling owner from request headers.
///
/// Credential verification lives in the deployment's auth layer; this seam
/// only translates whatever that layer forwards into an `OwnerId`, and
/// swaps out for a fake in tests.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<OwnerId>;
}

/// Trusts the numeric `x-user-id` header installed by the auth proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyHeaderIdentity;

impl ProxyHeaderIdentity {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityResolver for ProxyHeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> AppResult<OwnerId> {
        let raw = headers
            .get(OWNER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("malformed user id".to_string()))?;

        Ok(OwnerId(id))
    }
}

/// Middleware guarding owner-scoped routes.
///
/// On success the resolved `OwnerId` is stored in the request extensions
/// for handlers to extract.
pub async fn require_owner(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.identity.resolve(request.headers()) {
        Ok(owner) => {
            request.extensions_mut().insert(owner);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

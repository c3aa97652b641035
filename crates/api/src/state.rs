use std::sync::Arc;

use casting_db::Store;

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Movie and actor persistence.
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer-token verifier shared by the authorization extractors.
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig, verifier: TokenVerifier) -> Self {
        Self {
            store,
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        }
    }
}

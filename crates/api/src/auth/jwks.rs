//! JSON Web Key Set retrieval and caching.
//!
//! Keys are fetched lazily on the first lookup and cached for the life of the
//! process. A lookup for an unknown `kid` triggers one refetch so provider key
//! rotation is picked up without a restart; refetches are rate limited by
//! [`MIN_REFRESH_INTERVAL`].

use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{Jwk, JwkSet};
use tokio::sync::{Mutex, RwLock};

/// Minimum time between two fetches triggered by unknown key ids.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound on a single key-set request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The key set could not be retrieved from the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum KeySetError {
    #[error("failed to fetch JSON Web Key Set from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

enum KeySource {
    Remote { client: reqwest::Client, url: String },
    Static,
}

struct Cached {
    keys: JwkSet,
    fetched_at: Option<Instant>,
}

/// Resolves token key ids to JSON Web Keys.
pub struct KeyStore {
    source: KeySource,
    cache: RwLock<Cached>,
    /// Serializes refetches; lookups of known keys never wait on it.
    refresh: Mutex<()>,
}

impl KeyStore {
    /// Key store that fetches from `url` on demand.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::new(
            KeySource::Remote {
                client: reqwest::Client::new(),
                url: url.into(),
            },
            JwkSet { keys: Vec::new() },
        )
    }

    /// Key store over a fixed key set. Never performs network requests.
    pub fn with_keys(keys: JwkSet) -> Self {
        Self::new(KeySource::Static, keys)
    }

    fn new(source: KeySource, keys: JwkSet) -> Self {
        Self {
            source,
            cache: RwLock::new(Cached {
                keys,
                fetched_at: None,
            }),
            refresh: Mutex::new(()),
        }
    }

    /// Look up the key for `kid`, refreshing a remote key set if it is unknown.
    ///
    /// `Ok(None)` means the provider does not publish a key with this id.
    pub async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        if let Some(jwk) = self.cached(kid).await {
            return Ok(Some(jwk));
        }

        let KeySource::Remote { client, url } = &self.source else {
            return Ok(None);
        };

        let _refresh = self.refresh.lock().await;
        // Another request may have refreshed the set while we waited.
        if let Some(jwk) = self.cached(kid).await {
            return Ok(Some(jwk));
        }
        if self
            .cache
            .read()
            .await
            .fetched_at
            .is_some_and(|at| at.elapsed() < MIN_REFRESH_INTERVAL)
        {
            return Ok(None);
        }

        // The cache stays readable during the request. Failed attempts count
        // against the refresh interval too.
        let fetched = fetch(client, url).await;
        let mut cache = self.cache.write().await;
        cache.fetched_at = Some(Instant::now());
        let keys = fetched?;
        tracing::info!(url = %url, key_count = keys.keys.len(), "Fetched JSON Web Key Set");
        cache.keys = keys;

        Ok(cache.keys.find(kid).cloned())
    }

    async fn cached(&self, kid: &str) -> Option<Jwk> {
        self.cache.read().await.keys.find(kid).cloned()
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<JwkSet, KeySetError> {
    let fetch_err = |source| KeySetError::Fetch {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_err)?
        .json::<JwkSet>()
        .await
        .map_err(fetch_err)
}

use log::{debug, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::entity::TokenSnapshot;
use crate::services::cache_entry::CacheSlot;
use crate::services::clock::Clock;
use crate::services::mock_data::client_fallback_snapshot;
use crate::services::random::RandomSource;
use crate::services::subscription::{self, Subscription};
use crate::services::token_endpoint::TokenEndpoint;

pub const CLIENT_CACHE_TTL: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Consumer-side cache over the local token API.
///
/// `fetch_snapshot` always yields a snapshot: when the API cannot be reached
/// a synthetic one is generated (and not cached). Concurrent stale callers
/// each issue their own request.
pub struct ClientTokenCache {
    endpoint: Arc<dyn TokenEndpoint>,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn RandomSource>>,
    ttl: Duration,
    slot: CacheSlot,
}

impl ClientTokenCache {
    pub fn new(
        endpoint: Arc<dyn TokenEndpoint>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
        ttl: Duration,
    ) -> Self {
        Self {
            endpoint,
            clock,
            rng: Mutex::new(rng),
            ttl,
            slot: CacheSlot::new(),
        }
    }

    pub async fn fetch_snapshot(&self) -> Arc<TokenSnapshot> {
        if let Some(snapshot) = self.slot.fresh(self.clock.now(), self.ttl) {
            return snapshot;
        }

        match self.endpoint.fetch_token().await {
            Ok(response) => {
                let now = self.clock.now();
                let snapshot = Arc::new(response.into_snapshot(now));
                self.slot.replace(snapshot.clone(), now);
                debug!("Token data updated (mock: {})", snapshot.is_mock);
                snapshot
            }
            Err(e) => {
                warn!("Failed to fetch token data, using fallback data: {}", e);
                Arc::new(self.fallback_snapshot())
            }
        }
    }

    /// True when `/health` answers with status "ok"
    pub async fn check_api_health(&self) -> bool {
        match self.endpoint.fetch_health().await {
            Ok(health) => health.status == "ok",
            Err(e) => {
                warn!("API health check failed: {}", e);
                false
            }
        }
    }

    /// Calls `callback` right away and then every `interval` with a fresh
    /// fetch. Must be called from within a Tokio runtime.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F, interval: Duration) -> Subscription
    where
        F: Fn(Arc<TokenSnapshot>) + Send + Sync + 'static,
    {
        subscription::spawn(Arc::clone(self), Arc::new(callback), interval)
    }

    fn fallback_snapshot(&self) -> TokenSnapshot {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        client_fallback_snapshot(self.clock.now(), rng.as_mut())
    }
}

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

use crate::bags::FeesService;
use crate::entity::TokenSnapshot;
use crate::services::cache_entry::CacheSlot;
use crate::services::clock::Clock;
use crate::services::derivation::{derive_change, derive_price, estimate_volume, market_cap};
use crate::services::mock_data::server_mock_snapshot;
use crate::services::random::RandomSource;
use crate::solana::jupiter::{PriceService, QuoteService};
use crate::solana::tokens::{SOL_MINT, TWATAIR_DECIMALS, TWATAIR_MINT};
use crate::solana::utils::{one_sol_in_lamports, trading_url};

pub const SERVER_CACHE_TTL: Duration = Duration::from_secs(60);

/// Upstream data sources. Only built when credentials are configured.
#[derive(Clone)]
pub struct Upstream {
    pub fees: Arc<dyn FeesService>,
    pub quotes: Arc<dyn QuoteService>,
    pub prices: Arc<dyn PriceService>,
}

#[derive(Debug, Clone)]
pub struct ServerCacheSettings {
    pub ttl: Duration,
    pub token_mint: String,
    pub sol_mint: String,
    pub token_decimals: u8,
}

impl Default for ServerCacheSettings {
    fn default() -> Self {
        Self {
            ttl: SERVER_CACHE_TTL,
            token_mint: TWATAIR_MINT.to_string(),
            sol_mint: SOL_MINT.to_string(),
            token_decimals: TWATAIR_DECIMALS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Refreshed,
}

#[derive(Debug, Clone)]
pub struct ServedSnapshot {
    pub snapshot: Arc<TokenSnapshot>,
    pub status: CacheStatus,
}

impl ServedSnapshot {
    pub fn is_cached(&self) -> bool {
        self.status == CacheStatus::Hit
    }
}

/// Raw upstream results after per-source fallback
#[derive(Debug, Clone, Copy, Default)]
struct UpstreamData {
    lifetime_fees: f64,
    quote_out_amount: Option<u64>,
    sol_price: f64,
}

/// Read-through cache in front of the upstream providers.
///
/// Never fails: missing credentials, upstream faults and bad data all end in
/// a mock snapshot. Concurrent stale readers wait for a single refresh.
pub struct ServerTokenCache {
    upstream: Option<Upstream>,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn RandomSource>>,
    settings: ServerCacheSettings,
    slot: CacheSlot,
    // Last non-zero price; the lock also serializes refreshes
    previous_price: AsyncMutex<Option<f64>>,
}

impl ServerTokenCache {
    pub fn new(
        upstream: Option<Upstream>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
        settings: ServerCacheSettings,
    ) -> Self {
        Self {
            upstream,
            clock,
            rng: Mutex::new(rng),
            settings,
            slot: CacheSlot::new(),
            previous_price: AsyncMutex::new(None),
        }
    }

    pub fn is_mock_mode(&self) -> bool {
        self.upstream.is_none()
    }

    pub async fn previous_price(&self) -> Option<f64> {
        *self.previous_price.lock().await
    }

    pub async fn get_snapshot(&self) -> ServedSnapshot {
        if let Some(snapshot) = self.slot.fresh(self.clock.now(), self.settings.ttl) {
            debug!("Serving token snapshot from cache");
            return ServedSnapshot {
                snapshot,
                status: CacheStatus::Hit,
            };
        }

        let mut previous_price = self.previous_price.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.slot.fresh(self.clock.now(), self.settings.ttl) {
            debug!("Serving token snapshot refreshed by a concurrent request");
            return ServedSnapshot {
                snapshot,
                status: CacheStatus::Hit,
            };
        }

        let now = self.clock.now();
        let snapshot = match &self.upstream {
            None => {
                warn!("BAGS_API_KEY not configured, returning mock data");
                self.mock_snapshot(now)
            }
            Some(upstream) => match self.refresh(upstream, &mut previous_price, now).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("Failed to refresh token data, returning mock data: {}", e);
                    self.mock_snapshot(now)
                }
            },
        };

        let snapshot = Arc::new(snapshot);
        self.slot.replace(snapshot.clone(), now);

        ServedSnapshot {
            snapshot,
            status: CacheStatus::Refreshed,
        }
    }

    fn mock_snapshot(&self, now: DateTime<Utc>) -> TokenSnapshot {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        server_mock_snapshot(now, rng.as_mut())
    }

    async fn fetch_upstream(&self, upstream: &Upstream) -> UpstreamData {
        let mint = self.settings.token_mint.as_str();
        let sol_mint = self.settings.sol_mint.as_str();

        let (fees, quote, sol_price) = tokio::join!(
            upstream.fees.get_lifetime_fees(mint),
            upstream
                .quotes
                .get_swap_quote(sol_mint, mint, one_sol_in_lamports()),
            upstream.prices.get_sol_price(),
        );

        let lifetime_fees = fees.unwrap_or_else(|e| {
            warn!("Lifetime fees unavailable: {}", e);
            0.0
        });

        let quote_out_amount = match quote.and_then(|quote| quote.out_amount_units()) {
            Ok(out_amount) => Some(out_amount),
            Err(e) => {
                warn!("Quote unavailable: {}", e);
                None
            }
        };

        let sol_price = sol_price.unwrap_or_else(|e| {
            warn!("SOL price unavailable: {}", e);
            0.0
        });

        UpstreamData {
            lifetime_fees,
            quote_out_amount,
            sol_price,
        }
    }

    async fn refresh(
        &self,
        upstream: &Upstream,
        previous_price: &mut Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<TokenSnapshot> {
        let data = self.fetch_upstream(upstream).await;

        let derived = derive_price(
            data.quote_out_amount,
            self.settings.token_decimals,
            data.sol_price,
        );
        let price_change_24h = derive_change(*previous_price, derived.price);
        let volume_24h = estimate_volume(data.lifetime_fees, data.sol_price);

        let snapshot = TokenSnapshot {
            address: self.settings.token_mint.clone(),
            trading_url: trading_url(&self.settings.token_mint),
            price: derived.price,
            price_in_sol: derived.price_in_sol,
            price_change_24h,
            market_cap: market_cap(derived.price),
            volume_24h,
            lifetime_fees: data.lifetime_fees,
            sol_price: (data.sol_price > 0.0).then_some(data.sol_price),
            ..TokenSnapshot::blank(now)
        };

        ensure!(
            [
                snapshot.price,
                snapshot.price_in_sol,
                snapshot.price_change_24h,
                snapshot.market_cap,
                snapshot.volume_24h,
                snapshot.lifetime_fees,
            ]
            .iter()
            .all(|value| value.is_finite()),
            "derived token metrics are not finite: {:?}",
            snapshot
        );

        // A failed quote must not erase the last good price
        if derived.price > 0.0 {
            *previous_price = Some(derived.price);
        }

        info!(
            "Token data refreshed: price={} USD, price_in_sol={}, change={:.2}%",
            snapshot.price, snapshot.price_in_sol, snapshot.price_change_24h
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;
    use crate::services::random::SeededRandom;
    use crate::solana::jupiter::QuoteResponse;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeFees {
        calls: AtomicUsize,
        result: Option<f64>,
    }

    #[async_trait]
    impl FeesService for FakeFees {
        async fn get_lifetime_fees(&self, _mint: &str) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.ok_or_else(|| anyhow!("fees down"))
        }
    }

    struct FakeQuotes {
        calls: AtomicUsize,
        out_amounts: Mutex<Vec<Option<u64>>>,
    }

    #[async_trait]
    impl QuoteService for FakeQuotes {
        async fn get_swap_quote(
            &self,
            input_mint: &str,
            output_mint: &str,
            amount: u64,
        ) -> Result<QuoteResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(input_mint, SOL_MINT);
            assert_eq!(output_mint, TWATAIR_MINT);
            assert_eq!(amount, 1_000_000_000);

            let mut queue = self.out_amounts.lock().unwrap();
            let next = if queue.len() > 1 { queue.remove(0) } else { queue[0] };
            let out_amount = next.ok_or_else(|| anyhow!("quote down"))?;

            Ok(serde_json::from_value(serde_json::json!({
                "inAmount": amount.to_string(),
                "outAmount": out_amount.to_string(),
            }))?)
        }
    }

    struct FakePrices {
        result: Option<f64>,
    }

    #[async_trait]
    impl PriceService for FakePrices {
        async fn get_sol_price(&self) -> Result<f64> {
            self.result.ok_or_else(|| anyhow!("price down"))
        }
    }

    struct Harness {
        cache: ServerTokenCache,
        clock: Arc<ManualClock>,
        fees: Arc<FakeFees>,
        quotes: Arc<FakeQuotes>,
    }

    fn harness(fees: Option<f64>, quotes: Vec<Option<u64>>, sol_price: Option<f64>) -> Harness {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let fees = Arc::new(FakeFees {
            calls: AtomicUsize::new(0),
            result: fees,
        });
        let quotes = Arc::new(FakeQuotes {
            calls: AtomicUsize::new(0),
            out_amounts: Mutex::new(quotes),
        });
        let upstream = Upstream {
            fees: fees.clone(),
            quotes: quotes.clone(),
            prices: Arc::new(FakePrices { result: sol_price }),
        };
        let settings = ServerCacheSettings {
            token_decimals: 6,
            ..ServerCacheSettings::default()
        };

        Harness {
            cache: ServerTokenCache::new(
                Some(upstream),
                clock.clone(),
                Box::new(SeededRandom::new(5)),
                settings,
            ),
            clock,
            fees,
            quotes,
        }
    }

    #[tokio::test]
    async fn second_call_within_ttl_hits_cache() {
        let h = harness(Some(1.0), vec![Some(2_000_000)], Some(150.0));

        let first = h.cache.get_snapshot().await;
        h.clock.advance(Duration::from_secs(10));
        let second = h.cache.get_snapshot().await;

        assert_eq!(first.status, CacheStatus::Refreshed);
        assert!(second.is_cached());
        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
        assert_eq!(h.fees.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.quotes.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refreshes_after_ttl() {
        let h = harness(Some(1.0), vec![Some(2_000_000)], Some(150.0));

        h.cache.get_snapshot().await;
        h.clock.advance(Duration::from_secs(60));
        let second = h.cache.get_snapshot().await;

        assert_eq!(second.status, CacheStatus::Refreshed);
        assert_eq!(h.quotes.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn derives_live_snapshot() {
        let h = harness(Some(2.0), vec![Some(2_000_000)], Some(150.0));

        let served = h.cache.get_snapshot().await;
        let snapshot = &served.snapshot;

        assert!(!snapshot.is_mock);
        assert!((snapshot.price_in_sol - 0.5).abs() < 1e-12);
        assert!((snapshot.price - 75.0).abs() < 1e-9);
        assert_eq!(snapshot.price_change_24h, 0.0);
        assert!((snapshot.market_cap - 75_000_000_000.0).abs() < 1e-3);
        assert_eq!(snapshot.lifetime_fees, 2.0);
        assert_eq!(snapshot.sol_price, Some(150.0));
        assert_eq!(snapshot.fetched_at, h.clock.now());
    }

    #[tokio::test]
    async fn change_is_computed_between_refreshes() {
        // 2.0 tokens/SOL -> 0.5 SOL, then 1.6 tokens/SOL -> 0.625 SOL (+25%)
        let h = harness(Some(0.0), vec![Some(2_000_000), Some(1_600_000)], Some(100.0));

        h.cache.get_snapshot().await;
        h.clock.advance(Duration::from_secs(61));
        let second = h.cache.get_snapshot().await;

        assert!((second.snapshot.price_change_24h - 25.0).abs() < 1e-9);
        assert!((h.cache.previous_price().await.unwrap() - 62.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_quote_keeps_previous_price() {
        let h = harness(Some(1.0), vec![Some(2_000_000), None], Some(150.0));

        h.cache.get_snapshot().await;
        h.clock.advance(Duration::from_secs(61));
        let second = h.cache.get_snapshot().await;

        assert!(!second.snapshot.is_mock);
        assert_eq!(second.snapshot.price, 0.0);
        assert_eq!(second.snapshot.price_in_sol, 0.0);
        assert_eq!(second.snapshot.price_change_24h, 0.0);
        assert!((h.cache.previous_price().await.unwrap() - 75.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn each_sub_fetch_fails_independently() {
        let no_fees = harness(None, vec![Some(2_000_000)], Some(150.0));
        let snapshot = no_fees.cache.get_snapshot().await.snapshot;
        assert!(!snapshot.is_mock);
        assert_eq!(snapshot.lifetime_fees, 0.0);
        assert_eq!(snapshot.volume_24h, 0.0);
        assert!((snapshot.price - 75.0).abs() < 1e-9);

        let no_sol_price = harness(Some(1.0), vec![Some(2_000_000)], None);
        let snapshot = no_sol_price.cache.get_snapshot().await.snapshot;
        assert!(!snapshot.is_mock);
        assert_eq!(snapshot.price, 0.0);
        assert!((snapshot.price_in_sol - 0.5).abs() < 1e-12);
        assert_eq!(snapshot.sol_price, None);

        let no_quote = harness(Some(1.0), vec![None], Some(150.0));
        let snapshot = no_quote.cache.get_snapshot().await.snapshot;
        assert!(!snapshot.is_mock);
        assert_eq!(snapshot.price, 0.0);
        assert_eq!(snapshot.volume_24h, 1_500.0);
    }

    #[tokio::test]
    async fn without_credentials_serves_mock_and_caches_it() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = ServerTokenCache::new(
            None,
            clock.clone(),
            Box::new(SeededRandom::new(11)),
            ServerCacheSettings::default(),
        );

        let first = cache.get_snapshot().await;
        assert!(cache.is_mock_mode());
        assert!(first.snapshot.is_mock);
        assert!(first.snapshot.price >= 0.0);
        assert!(first.snapshot.price_change_24h.abs() <= 10.0);

        clock.advance(Duration::from_secs(30));
        let second = cache.get_snapshot().await;
        assert!(second.is_cached());
        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
    }

    #[tokio::test]
    async fn concurrent_stale_readers_share_one_refresh() {
        let h = harness(Some(1.0), vec![Some(2_000_000)], Some(150.0));

        let (a, b) = tokio::join!(h.cache.get_snapshot(), h.cache.get_snapshot());

        assert!(Arc::ptr_eq(&a.snapshot, &b.snapshot));
        assert_eq!(h.quotes.calls.load(Ordering::SeqCst), 1);
    }
}

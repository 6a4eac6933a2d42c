use anyhow::Result;
use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

use crate::bags::{BagsFeesService, FeesService};
use crate::config::AppConfig;
use crate::interactor::{TokenInteractor, TokenInteractorImpl};
use crate::services::{
    Clock, ClientTokenCache, HttpTokenEndpoint, SeededRandom, ServerCacheSettings,
    ServerTokenCache, SystemClock, TokenEndpoint, Upstream,
};
use crate::solana::client::create_http_client;
use crate::solana::jupiter::{JupiterPriceService, JupiterQuoteService, PriceService, QuoteService};
use crate::solana::tokens::{SOL_MINT, TWATAIR_MINT};

/// ServiceContainer wires configuration into the caches and interactors
pub struct ServiceContainer {
    config: AppConfig,
    http_client: Client,
    clock: Arc<dyn Clock>,

    server_cache: Arc<ServerTokenCache>,
    token_interactor: Arc<dyn TokenInteractor>,
}

impl ServiceContainer {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http_client = create_http_client(config.http_timeout())?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        // Upstream providers only exist when we have credentials
        let upstream = match config.api_key() {
            Some(api_key) => {
                let jupiter_config = config.jupiter_config();

                let fees = Arc::new(BagsFeesService::new(
                    http_client.clone(),
                    config.bags_api_url.clone(),
                    api_key.to_string(),
                )) as Arc<dyn FeesService>;

                let quotes = Arc::new(JupiterQuoteService::new(
                    http_client.clone(),
                    jupiter_config.clone(),
                )) as Arc<dyn QuoteService>;

                let prices = Arc::new(JupiterPriceService::new(
                    http_client.clone(),
                    jupiter_config,
                )) as Arc<dyn PriceService>;

                info!("Upstream credentials found, serving live token data");
                Some(Upstream {
                    fees,
                    quotes,
                    prices,
                })
            }
            None => {
                warn!("BAGS_API_KEY is not set, serving mock token data");
                None
            }
        };

        let settings = ServerCacheSettings {
            ttl: config.server_cache_ttl(),
            token_mint: TWATAIR_MINT.to_string(),
            sol_mint: if config.sol_token_address.is_empty() {
                SOL_MINT.to_string()
            } else {
                config.sol_token_address.clone()
            },
            token_decimals: config.token_decimals,
        };

        let server_cache = Arc::new(ServerTokenCache::new(
            upstream,
            clock.clone(),
            Box::new(SeededRandom::from_os()),
            settings,
        ));

        let token_interactor = Arc::new(TokenInteractorImpl::new(
            server_cache.clone(),
            clock.clone(),
        )) as Arc<dyn TokenInteractor>;

        Ok(Self {
            config,
            http_client,
            clock,
            server_cache,
            token_interactor,
        })
    }

    // Accessor methods

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn server_cache(&self) -> Arc<ServerTokenCache> {
        self.server_cache.clone()
    }

    pub fn token_interactor(&self) -> Arc<dyn TokenInteractor> {
        self.token_interactor.clone()
    }

    /// Client-side cache pointed at a token API, e.g. `http://host:3000/api`
    pub fn client_cache(&self, api_base_url: &str) -> Arc<ClientTokenCache> {
        let endpoint = Arc::new(HttpTokenEndpoint::new(self.http_client.clone(), api_base_url))
            as Arc<dyn TokenEndpoint>;

        Arc::new(ClientTokenCache::new(
            endpoint,
            self.clock.clone(),
            Box::new(SeededRandom::from_os()),
            self.config.client_cache_ttl(),
        ))
    }
}

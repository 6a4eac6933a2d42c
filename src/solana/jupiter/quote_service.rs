use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::solana::jupiter::models::QuoteResponse;
use crate::solana::jupiter::Config;

/// Сервис для получения котировок обмена токенов
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Quote for swapping `amount` base units of `input_mint` into `output_mint`
    async fn get_swap_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<QuoteResponse>;
}

pub struct JupiterQuoteService {
    http_client: Client,
    config: Config,
}

impl JupiterQuoteService {
    /// Создает новый экземпляр сервиса котировок
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_swap_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<QuoteResponse> {
        let url = format!("{}/quote", self.config.quote_api_url);
        let amount = amount.to_string();
        let slippage_bps = self.config.slippage_bps.to_string();

        debug!(
            "Requesting quote: {} {} -> {}",
            amount, input_mint, output_mint
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("inputMint", input_mint),
                ("outputMint", output_mint),
                ("amount", amount.as_str()),
                ("slippageBps", slippage_bps.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to get quote from Jupiter API: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Jupiter quote error {}: {}", status, error_text));
        }

        let quote: QuoteResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse quote response: {}", e))?;

        info!(
            "Quote received: input_amount={}, output_amount={}",
            quote.in_amount, quote.out_amount
        );

        Ok(quote)
    }
}

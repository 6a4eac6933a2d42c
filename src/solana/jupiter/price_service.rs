use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::solana::jupiter::models::JupiterPriceResponse;
use crate::solana::jupiter::Config;

// Структура для обработки ошибок из Jupiter API
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Интерфейс для сервиса информации о ценах токенов
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Получить текущую цену SOL в USD
    async fn get_sol_price(&self) -> Result<f64>;
}

/// Реализация сервиса цен с использованием Jupiter API
pub struct JupiterPriceService {
    http_client: Client,
    config: Config,
}

impl JupiterPriceService {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Проверяет ответ API на наличие ошибки
    fn check_for_api_error<D>(&self, value: serde_json::Value) -> Result<D>
    where
        D: serde::de::DeserializeOwned,
    {
        if let Ok(ErrorResponse { error }) = serde_json::from_value::<ErrorResponse>(value.clone())
        {
            Err(anyhow!("API error: {}", error))
        } else {
            serde_json::from_value(value)
                .map_err(|err| anyhow!("JSON deserialization error: {}", err))
        }
    }
}

#[async_trait]
impl PriceService for JupiterPriceService {
    async fn get_sol_price(&self) -> Result<f64> {
        let sol_mint = self.config.sol_token_address.as_str();

        let response = self
            .http_client
            .get(&self.config.price_api_url)
            .query(&[("ids", sol_mint)])
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Jupiter API error: {}", error_text));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse prices response: {}", e))?;

        let prices: JupiterPriceResponse = self.check_for_api_error(body)?;

        let sol_price = prices
            .price_of(sol_mint)
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or_else(|| anyhow!("No usable SOL price in response"))?;

        debug!("SOL price: {} USD", sol_price);

        Ok(sol_price)
    }
}

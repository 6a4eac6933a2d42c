// src/solana/jupiter/models.rs
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Deserializes numbers that Jupiter sometimes sends as strings
pub mod string_or_float {
    use serde::{self, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrFloat;

        impl<'de> serde::de::Visitor<'de> for StringOrFloat {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a float or a string containing a float")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.trim().parse::<f64>().map_err(serde::de::Error::custom)
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&value)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value as f64)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value as f64)
            }
        }

        deserializer.deserialize_any(StringOrFloat)
    }
}

// Ответ API с котировкой
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default)]
    pub input_mint: String,
    #[serde(default)]
    pub output_mint: String,
    #[serde(default)]
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default)]
    pub swap_mode: String,
    #[serde(default)]
    pub slippage_bps: u64,
    #[serde(default, with = "string_or_float")]
    pub price_impact_pct: f64,
    pub context_slot: Option<u64>,
    pub time_taken: Option<f64>,
}

impl QuoteResponse {
    /// Output amount in base units of the output mint
    pub fn out_amount_units(&self) -> Result<u64> {
        self.out_amount
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid outAmount '{}': {}", self.out_amount, e))
    }
}

// Структура для ответа API цен Jupiter
#[derive(Debug, Deserialize)]
pub struct JupiterPriceResponse {
    pub data: HashMap<String, Option<TokenData>>,
    #[serde(rename = "timeTaken")]
    pub time_taken: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub id: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    #[serde(with = "string_or_float")]
    pub price: f64,
}

impl JupiterPriceResponse {
    pub fn price_of(&self, mint: &str) -> Option<f64> {
        self.data
            .get(mint)
            .and_then(|entry| entry.as_ref())
            .map(|entry| entry.price)
    }
}

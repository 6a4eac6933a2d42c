use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::solana::utils::lamports_to_sol;

/// Body of `token-launch/lifetime-fees`.
///
/// Older deployments answer `{ "lifetimeFees": <SOL> }`, the v2 API answers
/// `{ "success": true, "response": "<lamports>" }`.
#[derive(Debug, Deserialize)]
pub struct LifetimeFeesResponse {
    pub success: Option<bool>,
    pub response: Option<Value>,
    pub error: Option<String>,
    #[serde(rename = "lifetimeFees")]
    pub lifetime_fees: Option<f64>,
}

impl LifetimeFeesResponse {
    /// Lifetime fees in SOL
    pub fn fees_in_sol(&self) -> Result<f64> {
        if self.success == Some(false) {
            return Err(anyhow!(
                "Bags API error: {}",
                self.error.as_deref().unwrap_or("unknown error")
            ));
        }

        if let Some(fees) = self.lifetime_fees {
            return Ok(fees.max(0.0));
        }

        let lamports = match &self.response {
            Some(Value::String(raw)) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow!("Invalid lamports value '{}': {}", raw, e))?,
            Some(Value::Number(number)) => number
                .as_u64()
                .ok_or_else(|| anyhow!("Invalid lamports value {}", number))?,
            _ => return Err(anyhow!("Lifetime fees missing from response")),
        };

        Ok(lamports_to_sol(lamports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> LifetimeFeesResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn reads_legacy_shape() {
        let fees = parse(json!({ "lifetimeFees": 12.5 })).fees_in_sol().unwrap();
        assert_eq!(fees, 12.5);
    }

    #[test]
    fn converts_lamports_string() {
        let fees = parse(json!({ "success": true, "response": "2500000000" }))
            .fees_in_sol()
            .unwrap();
        assert_eq!(fees, 2.5);
    }

    #[test]
    fn reports_api_errors_and_missing_fields() {
        assert!(parse(json!({ "success": false, "error": "bad mint" }))
            .fees_in_sol()
            .is_err());
        assert!(parse(json!({ "success": true })).fees_in_sol().is_err());
        assert!(parse(json!({ "response": "-1" })).fees_in_sol().is_err());
    }
}

//! Sorted vessel list from the Palladium positions API.
//!
//! The endpoint wraps its rows in a `data` envelope:
//!
//! ```json
//! {"data": [{"walletaddress": "0x...", "nltv": 144}, ...]}
//! ```
//!
//! Rows arrive ordered by ascending risk. Each one is validated and
//! converted into a `Position`; one malformed row fails the whole fetch,
//! since a silently dropped row would shift the walk onto the wrong
//! vessel.

use std::time::Duration;

use alloy::primitives::{Address, U256};
use serde::Deserialize;

use pilot_common::error::HintError;
use pilot_common::types::Position;
use pilot_engine::sources::PositionDataSource;

use crate::retry::RetryPolicy;

/// `PositionDataSource` backed by the sorted-positions HTTP API.
pub struct SortedPositionsApi {
    client: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl SortedPositionsApi {
    pub fn new(endpoint: String, timeout: Duration, retry: RetryPolicy) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            retry,
        })
    }
}

impl PositionDataSource for SortedPositionsApi {
    async fn fetch_sorted_positions(&self, asset: Address) -> Result<Vec<Position>, HintError> {
        let envelope = self
            .retry
            .run("fetch_sorted_positions", || {
                let client = self.client.clone();
                let endpoint = self.endpoint.clone();
                async move {
                    let response = client.get(&endpoint).send().await.map_err(|e| {
                        HintError::DataUnavailable(format!("positions API request: {e}"))
                    })?;
                    let response = response.error_for_status().map_err(|e| {
                        HintError::DataUnavailable(format!("positions API status: {e}"))
                    })?;
                    response.json::<PositionsEnvelope>().await.map_err(|e| {
                        HintError::DataUnavailable(format!("positions API payload: {e}"))
                    })
                }
            })
            .await?;

        let mut positions = Vec::with_capacity(envelope.data.len());
        for row in &envelope.data {
            positions.push(row.to_position()?);
        }

        tracing::debug!(
            asset = %asset,
            positions = positions.len(),
            "Fetched sorted vessel list"
        );
        Ok(positions)
    }
}

#[derive(Debug, Deserialize)]
struct PositionsEnvelope {
    data: Vec<PositionRow>,
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    walletaddress: String,
    nltv: serde_json::Value,
}

impl PositionRow {
    fn to_position(&self) -> Result<Position, HintError> {
        let owner: Address = self.walletaddress.trim().parse().map_err(|_| {
            HintError::DataUnavailable(format!(
                "malformed wallet address: {}",
                self.walletaddress
            ))
        })?;
        let nltv = parse_nltv(&self.nltv)?;
        Ok(Position { owner, nltv })
    }
}

/// The API serves `nltv` either as a JSON integer or as a decimal string.
/// Fractional or negative values are malformed, not rounded.
fn parse_nltv(raw: &serde_json::Value) -> Result<U256, HintError> {
    match raw {
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| HintError::DataUnavailable(format!("nltv is not a whole number: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<U256>()
            .map_err(|_| HintError::DataUnavailable(format!("malformed nltv: {s}"))),
        other => Err(HintError::DataUnavailable(format!(
            "unexpected nltv value: {other}"
        ))),
    }
}

//! Protocol parameters read from the AdminContract and PriceOracle.
//!
//! MCR and the debt floor are per-asset values on the AdminContract. The
//! price comes from the oracle's latest round: the answer must be
//! positive, the round must be younger than the configured age bound, and
//! the value is rescaled from the feed's native decimals to 1e18 before
//! the engine sees it.

use alloy::primitives::{Address, I256, U256};
use alloy::providers::Provider;
use chrono::Utc;

use pilot_common::error::HintError;
use pilot_engine::sources::ParameterSource;

use crate::bindings::{IAdminContract, IPriceOracle};
use crate::retry::RetryPolicy;

const TARGET_DECIMALS: u8 = 18;

/// `ParameterSource` backed by the live AdminContract and PriceOracle.
pub struct ContractParameterSource<P> {
    provider: P,
    admin_contract: Address,
    price_oracle: Address,
    /// Maximum accepted round age in seconds; 0 disables the check.
    oracle_max_age_secs: u64,
    retry: RetryPolicy,
}

impl<P: Provider + Clone> ContractParameterSource<P> {
    pub fn new(
        provider: P,
        admin_contract: Address,
        price_oracle: Address,
        oracle_max_age_secs: u64,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            admin_contract,
            price_oracle,
            oracle_max_age_secs,
            retry,
        }
    }
}

impl<P: Provider + Clone> ParameterSource for ContractParameterSource<P> {
    async fn min_collateral_ratio(&self, asset: Address) -> Result<U256, HintError> {
        let contract = IAdminContract::new(self.admin_contract, self.provider.clone());
        self.retry
            .run("getMcr", || {
                let contract = contract.clone();
                async move {
                    contract.getMcr(asset).call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("getMcr({asset}): {e}"))
                    })
                }
            })
            .await
    }

    async fn min_net_debt(&self, asset: Address) -> Result<U256, HintError> {
        let contract = IAdminContract::new(self.admin_contract, self.provider.clone());
        self.retry
            .run("getMinNetDebt", || {
                let contract = contract.clone();
                async move {
                    contract.getMinNetDebt(asset).call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("getMinNetDebt({asset}): {e}"))
                    })
                }
            })
            .await
    }

    async fn asset_price(&self, asset: Address) -> Result<U256, HintError> {
        let oracle = IPriceOracle::new(self.price_oracle, self.provider.clone());

        let round = self
            .retry
            .run("latestRoundData", || {
                let oracle = oracle.clone();
                async move {
                    oracle.latestRoundData().call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("latestRoundData: {e}"))
                    })
                }
            })
            .await?;

        let now = Utc::now().timestamp().max(0) as u64;
        let raw = validate_round(round.answer, round.updatedAt, self.oracle_max_age_secs, now)?;

        let decimals = self
            .retry
            .run("decimals", || {
                let oracle = oracle.clone();
                async move {
                    oracle.decimals().call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("oracle decimals: {e}"))
                    })
                }
            })
            .await?;

        let price = rescale_price(raw, decimals)?;
        tracing::debug!(asset = %asset, price = %price, feed_decimals = decimals, "Oracle price");
        Ok(price)
    }
}

/// Check the round's answer and age, returning the answer's magnitude.
fn validate_round(
    answer: I256,
    updated_at: U256,
    max_age_secs: u64,
    now: u64,
) -> Result<U256, HintError> {
    if answer.is_negative() || answer.is_zero() {
        return Err(HintError::DataUnavailable(format!(
            "oracle answer {answer} is not positive"
        )));
    }

    if max_age_secs > 0 {
        let updated_at = u64::try_from(updated_at).map_err(|_| {
            HintError::DataUnavailable(format!("oracle round timestamp {updated_at} out of range"))
        })?;
        let age = now.saturating_sub(updated_at);
        if age > max_age_secs {
            return Err(HintError::DataUnavailable(format!(
                "oracle round is {age}s old, limit is {max_age_secs}s"
            )));
        }
    }

    Ok(answer.into_raw())
}

/// Rescale a feed value from its native decimals to the 1e18 scale.
fn rescale_price(value: U256, decimals: u8) -> Result<U256, HintError> {
    if decimals == TARGET_DECIMALS {
        return Ok(value);
    }
    if decimals < TARGET_DECIMALS {
        let factor = U256::from(10u64)
            .checked_pow(U256::from(TARGET_DECIMALS - decimals))
            .ok_or(HintError::Overflow("price rescale"))?;
        value
            .checked_mul(factor)
            .ok_or(HintError::Overflow("price rescale"))
    } else {
        let factor = U256::from(10u64)
            .checked_pow(U256::from(decimals - TARGET_DECIMALS))
            .ok_or(HintError::Overflow("price rescale"))?;
        Ok(value / factor)
    }
}

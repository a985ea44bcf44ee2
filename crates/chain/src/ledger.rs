//! Per-vessel debt and collateral reads from the VesselManager contract.

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use pilot_common::error::HintError;
use pilot_engine::sources::PositionLedger;

use crate::bindings::IVesselManager;
use crate::retry::RetryPolicy;

/// `PositionLedger` backed by the live VesselManager.
pub struct VesselManagerLedger<P> {
    provider: P,
    vessel_manager: Address,
    retry: RetryPolicy,
}

impl<P: Provider + Clone> VesselManagerLedger<P> {
    pub fn new(provider: P, vessel_manager: Address, retry: RetryPolicy) -> Self {
        Self {
            provider,
            vessel_manager,
            retry,
        }
    }

    fn contract(&self) -> IVesselManager::IVesselManagerInstance<P> {
        IVesselManager::new(self.vessel_manager, self.provider.clone())
    }
}

impl<P: Provider + Clone> PositionLedger for VesselManagerLedger<P> {
    async fn debt(&self, asset: Address, owner: Address) -> Result<U256, HintError> {
        let contract = self.contract();
        self.retry
            .run("getVesselDebt", || {
                let contract = contract.clone();
                async move {
                    contract.getVesselDebt(asset, owner).call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("getVesselDebt({owner}): {e}"))
                    })
                }
            })
            .await
    }

    async fn pending_debt_reward(
        &self,
        asset: Address,
        owner: Address,
    ) -> Result<U256, HintError> {
        let contract = self.contract();
        self.retry
            .run("getPendingDebtTokenReward", || {
                let contract = contract.clone();
                async move {
                    contract
                        .getPendingDebtTokenReward(asset, owner)
                        .call()
                        .await
                        .map_err(|e| {
                            HintError::DataUnavailable(format!(
                                "getPendingDebtTokenReward({owner}): {e}"
                            ))
                        })
                }
            })
            .await
    }

    async fn collateral(&self, asset: Address, owner: Address) -> Result<U256, HintError> {
        let contract = self.contract();
        self.retry
            .run("getVesselColl", || {
                let contract = contract.clone();
                async move {
                    contract.getVesselColl(asset, owner).call().await.map_err(|e| {
                        HintError::DataUnavailable(format!("getVesselColl({owner}): {e}"))
                    })
                }
            })
            .await
    }

    async fn pending_collateral_reward(
        &self,
        asset: Address,
        owner: Address,
    ) -> Result<U256, HintError> {
        let contract = self.contract();
        self.retry
            .run("getPendingAssetReward", || {
                let contract = contract.clone();
                async move {
                    contract
                        .getPendingAssetReward(asset, owner)
                        .call()
                        .await
                        .map_err(|e| {
                            HintError::DataUnavailable(format!(
                                "getPendingAssetReward({owner}): {e}"
                            ))
                        })
                }
            })
            .await
    }
}
